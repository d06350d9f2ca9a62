mod common;
use common::{
    ADMIN_EMAIL, create_user, init_with_admin, login, login_admin, run_ok, setup_test_db, tt,
};
use predicates::str::contains;

#[test]
fn test_init_and_login_as_admin() {
    let db = setup_test_db("auth_login");
    init_with_admin(&db);
    login_admin(&db);

    tt().args(["--db", &db, "whoami"])
        .assert()
        .success()
        .stdout(contains("Ada Admin"))
        .stdout(contains(ADMIN_EMAIL))
        .stdout(contains("Admin"));
}

#[test]
fn test_wrong_password_is_rejected() {
    let db = setup_test_db("auth_wrong_pw");
    init_with_admin(&db);

    tt().args([
        "--db",
        &db,
        "login",
        "--email",
        ADMIN_EMAIL,
        "--password",
        "not-the-password",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid email or password"));
}

#[test]
fn test_commands_require_a_session() {
    let db = setup_test_db("auth_no_session");
    init_with_admin(&db);

    tt().args(["--db", &db, "crew", "list"])
        .assert()
        .failure()
        .stderr(contains("Not authenticated"));
}

#[test]
fn test_logout_ends_the_session() {
    let db = setup_test_db("auth_logout");
    init_with_admin(&db);
    login_admin(&db);

    run_ok(&db, &["logout"]);

    tt().args(["--db", &db, "whoami"])
        .assert()
        .failure()
        .stderr(contains("Not authenticated"));
}

#[test]
fn test_worker_cannot_manage_users() {
    let db = setup_test_db("auth_worker_forbidden");
    init_with_admin(&db);
    login_admin(&db);
    create_user(&db, "worker@example.com", "worker", None, Some("18.5"));

    login(&db, "worker@example.com", "worker-pass");

    tt().args(["--db", &db, "user", "list"])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));

    tt().args(["--db", &db, "whoami"])
        .assert()
        .success()
        .stdout(contains("Worker"))
        .stdout(contains("$18.50/h"));
}

#[test]
fn test_second_admin_bootstrap_is_refused() {
    let db = setup_test_db("auth_second_bootstrap");
    init_with_admin(&db);

    tt().args([
        "--db",
        &db,
        "--test",
        "init",
        "--admin-email",
        "other@example.com",
        "--admin-password",
        "another-secret",
        "--first-name",
        "Eve",
        "--last-name",
        "Other",
    ])
    .assert()
    .failure()
    .stderr(contains("administrator already exists"));
}

#[test]
fn test_profile_update_clears_blank_phone() {
    let db = setup_test_db("auth_profile");
    init_with_admin(&db);
    login_admin(&db);

    run_ok(&db, &["profile", "update", "--phone", "555-0101"]);
    tt().args(["--db", &db, "profile", "show"])
        .assert()
        .success()
        .stdout(contains("555-0101"));

    run_ok(&db, &["profile", "update", "--phone", "  "]);
    let out = run_ok(&db, &["profile", "show"]);
    assert!(!out.contains("555-0101"));
    assert!(out.contains("Phone:      --"));
}
