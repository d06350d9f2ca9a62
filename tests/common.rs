#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use regex::Regex;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-secret";

pub fn tt() -> Command {
    cargo_bin_cmd!("tradetracker")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// leftover database or session file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tradetracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{db_path}.session")).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db` and return its stdout; the command must succeed.
pub fn run_ok(db: &str, args: &[&str]) -> String {
    let out = tt()
        .args(["--db", db])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&out).to_string()
}

/// First UUID printed by a command (ids are echoed on creation).
pub fn extract_id(output: &str) -> String {
    let re = Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap();
    re.find(output)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| panic!("no id in output:\n{output}"))
}

/// Fresh database with a bootstrapped administrator.
pub fn init_with_admin(db: &str) {
    tt().args([
        "--db",
        db,
        "--test",
        "init",
        "--admin-email",
        ADMIN_EMAIL,
        "--admin-password",
        ADMIN_PASSWORD,
        "--first-name",
        "Ada",
        "--last-name",
        "Admin",
    ])
    .assert()
    .success();
}

pub fn login(db: &str, email: &str, password: &str) {
    run_ok(db, &["login", "--email", email, "--password", password]);
}

pub fn login_admin(db: &str) {
    login(db, ADMIN_EMAIL, ADMIN_PASSWORD);
}

/// Create a user as the logged-in admin and return its id.
pub fn create_user(db: &str, email: &str, role: &str, crew: Option<&str>, rate: Option<&str>) -> String {
    let mut args = vec![
        "user",
        "create",
        "--email",
        email,
        "--password",
        "worker-pass",
        "--first-name",
        "Test",
        "--last-name",
        "User",
        "--role",
        role,
    ];
    if let Some(c) = crew {
        args.extend(["--crew", c]);
    }
    if let Some(r) = rate {
        args.extend(["--rate", r]);
    }
    extract_id(&run_ok(db, &args))
}
