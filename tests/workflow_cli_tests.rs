mod common;
use common::{
    create_user, extract_id, init_with_admin, login, login_admin, run_ok, setup_test_db, temp_out,
    tt,
};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

/// Admin, one crew, a worker at $20/h and a foreman in that crew.
fn setup_crew(db: &str) -> (String, String) {
    init_with_admin(db);
    login_admin(db);

    let crew = extract_id(&run_ok(db, &["crew", "create", "--name", "Framing A"]));
    let worker = create_user(db, "worker@example.com", "worker", Some(&crew), Some("20"));
    create_user(db, "foreman@example.com", "foreman", Some(&crew), None);
    (crew, worker)
}

#[test]
fn test_trade_in_use_cannot_be_deleted() {
    let db = setup_test_db("wf_trade_in_use");
    init_with_admin(&db);
    login_admin(&db);

    let trade = extract_id(&run_ok(&db, &["trade", "create", "--name", "Concrete"]));
    let crew = extract_id(&run_ok(
        &db,
        &["crew", "create", "--name", "Pour crew", "--trade", &trade],
    ));

    tt().args(["--db", &db, "trade", "delete", &trade])
        .assert()
        .failure()
        .stderr(contains(
            "Cannot delete trade that is assigned to crews. Please reassign or remove crews first.",
        ));

    // detach the crew, then the trade can go
    run_ok(&db, &["crew", "update", &crew, "--name", "Pour crew"]);
    run_ok(&db, &["trade", "delete", &trade]);

    tt().args(["--db", &db, "trade", "list"])
        .assert()
        .success()
        .stdout(contains("No trades found."));
}

#[test]
fn test_duplicate_hours_are_rejected() {
    let db = setup_test_db("wf_duplicate_hours");
    setup_crew(&db);
    login(&db, "worker@example.com", "worker-pass");

    run_ok(&db, &["hours", "submit", "--date", "2025-01-06", "--hours", "8"]);

    tt().args([
        "--db",
        &db,
        "hours",
        "submit",
        "--date",
        "2025-01-06",
        "--hours",
        "4",
    ])
    .assert()
    .failure()
    .stderr(contains(
        "Hours already submitted for this date. Please edit or delete existing entry.",
    ));

    tt().args([
        "--db",
        &db,
        "hours",
        "submit",
        "--date",
        "2025-01-07",
        "--hours",
        "25",
    ])
    .assert()
    .failure()
    .stderr(contains("hours must be greater than 0"));
}

#[test]
fn test_weekly_report_from_legacy_jobs() {
    let db = setup_test_db("wf_weekly_report");
    let (crew, _) = setup_crew(&db);

    login(&db, "worker@example.com", "worker-pass");
    run_ok(&db, &["hours", "submit", "--date", "2025-01-06", "--hours", "8"]);
    run_ok(&db, &["hours", "submit", "--date", "2025-01-07", "--hours", "8"]);
    // outside the week
    run_ok(&db, &["hours", "submit", "--date", "2025-01-13", "--hours", "8"]);

    login(&db, "foreman@example.com", "worker-pass");
    run_ok(
        &db,
        &[
            "legacy-job",
            "add",
            "--job-name",
            "Maple St",
            "--yardage",
            "100",
            "--rate",
            "5",
            "--date",
            "2025-01-08",
        ],
    );

    login_admin(&db);
    tt().args([
        "--db",
        &db,
        "report",
        "weekly",
        "--crew",
        &crew,
        "--week-start",
        "2025-01-06",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"week_end\": \"2025-01-12\""))
    .stdout(contains("\"total_job_earnings\": 500.0"))
    .stdout(contains("\"total_minimum_required\": 320.0"))
    .stdout(contains("\"bonus_pool\": 180.0"))
    .stdout(contains("\"is_compliant\": true"))
    .stdout(contains("\"full_name\": \"Test User\""));

    tt().args([
        "--db",
        &db,
        "report",
        "weekly",
        "--crew",
        &crew,
        "--week-start",
        "2025-01-08",
    ])
    .assert()
    .success()
    .stdout(contains("not a Monday"))
    .stdout(contains("COMPLIANT"))
    .stdout(contains("Crew revenue covers").not());

    // JSON output stays parseable for a non-Monday start
    let out = run_ok(
        &db,
        &[
            "report", "weekly", "--crew", &crew, "--week-start", "2025-01-08", "--json",
        ],
    );
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["week_start"], "2025-01-08");
    assert_eq!(report["week_end"], "2025-01-14");
    assert!(!out.contains("not a Monday"));
}

#[test]
fn test_weekly_export_in_both_formats() {
    let db = setup_test_db("wf_weekly_export");
    let (crew, worker) = setup_crew(&db);

    login(&db, "worker@example.com", "worker-pass");
    run_ok(&db, &["hours", "submit", "--date", "2025-01-06", "--hours", "8"]);
    run_ok(&db, &["hours", "submit", "--date", "2025-01-07", "--hours", "8"]);

    login(&db, "foreman@example.com", "worker-pass");
    for (date, yardage) in [("2025-01-08", "100"), ("2025-02-04", "10")] {
        run_ok(
            &db,
            &[
                "legacy-job", "add", "--job-name", "Maple St", "--yardage", yardage, "--rate",
                "5", "--date", date,
            ],
        );
    }

    login_admin(&db);
    let export = |week: &str, format: &str, ext: &str| -> String {
        let out = temp_out(&format!("wf_weekly_export_{week}"), ext);
        run_ok(
            &db,
            &[
                "export", "--what", "weekly", "--format", format, "--crew", &crew,
                "--week-start", week, "--file", &out, "--force",
            ],
        );
        fs::read_to_string(&out).unwrap()
    };

    let csv = export("2025-01-06", "csv", "csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("week_start,week_end,worker_id,full_name,hourly_rate"));
    assert!(lines[1].starts_with(&format!("2025-01-06,2025-01-12,{worker},Test User,")));
    assert!(lines[1].ends_with("20.0,16.0,320.0,500.0,320.0,180.0,true"));

    let json = export("2025-01-06", "json", "json");
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["bonus_pool"], 180.0);
    assert_eq!(report["workers"].as_array().unwrap().len(), 1);

    // revenue but no hours: the totals still reach the file
    let csv = export("2025-02-03", "csv", "csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("total_job_earnings,total_minimum_required,bonus_pool,is_compliant"));
    assert_eq!(lines[1], "2025-02-03,2025-02-09,,,,,,50.0,0.0,50.0,true");

    // nothing at all in the week
    let json = export("2025-03-03", "json", "json");
    assert!(!json.contains("-0.0"));
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["total_job_earnings"], 0.0);
    assert_eq!(report["total_minimum_required"], 0.0);
    assert_eq!(report["is_compliant"], true);

    tt().args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("weekly report for 2025-02-03 (0 workers, 1 records) exported as csv"))
        .stdout(contains("weekly report for 2025-01-06 (1 workers, 2 records) exported as csv"));
}

#[test]
fn test_weekly_report_rejects_bad_date() {
    let db = setup_test_db("wf_weekly_bad_date");
    let (crew, _) = setup_crew(&db);

    tt().args([
        "--db",
        &db,
        "report",
        "weekly",
        "--crew",
        &crew,
        "--week-start",
        "06/01/2025",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date format"));
}

#[test]
fn test_job_log_flow_and_export() {
    let db = setup_test_db("wf_job_logs");
    let (crew, _) = setup_crew(&db);

    let job = extract_id(&run_ok(&db, &["job", "create", "--name", "Oak Ridge"]));
    let elevation = extract_id(&run_ok(
        &db,
        &[
            "elevation", "add", "--job", &job, "--name", "Front", "--yardage", "10", "--rate",
            "5.5",
        ],
    ));

    tt().args(["--db", &db, "elevation", "list", "--job", &job])
        .assert()
        .success()
        .stdout(contains("Front"))
        .stdout(contains("$55.00"));

    login(&db, "foreman@example.com", "worker-pass");
    run_ok(
        &db,
        &[
            "joblog",
            "add",
            "--job",
            &job,
            "--elevation",
            &elevation,
            "--lot",
            "Lot 7",
            "--date",
            "2025-01-07",
        ],
    );

    tt().args(["--db", &db, "joblog", "list", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Oak Ridge"))
        .stdout(contains("Lot 7"))
        .stdout(contains("Revenue: $55.00"));

    login_admin(&db);
    tt().args(["--db", &db, "joblog", "list", "--search", "oak"])
        .assert()
        .success()
        .stdout(contains("Framing A"));

    tt().args([
        "--db",
        &db,
        "report",
        "weekly",
        "--crew",
        &crew,
        "--week-start",
        "2025-01-06",
        "--source",
        "logs",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"total_job_earnings\": 55.0"));

    let out = temp_out("wf_job_logs", "csv");
    run_ok(
        &db,
        &[
            "export", "--what", "job-logs", "--format", "csv", "--file", &out, "--force",
        ],
    );
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("id,date_worked,job_name,elevation_name,lot"));
    assert!(content.contains("Oak Ridge,Front,Lot 7,Framing A"));

    // deleting the template removes its logs
    run_ok(&db, &["job", "delete", &job]);
    tt().args(["--db", &db, "joblog", "list"])
        .assert()
        .success()
        .stdout(contains("No job logs found."));
}

#[test]
fn test_audit_log_records_actions() {
    let db = setup_test_db("wf_audit_log");
    setup_crew(&db);

    tt().args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("crew_create"))
        .stdout(contains("user_create"));
}

#[test]
fn test_dashboards_follow_the_role() {
    let db = setup_test_db("wf_dashboards");
    setup_crew(&db);

    tt().args(["--db", &db, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Admin dashboard, Ada A."));

    login(&db, "worker@example.com", "worker-pass");
    let today = chrono::Local::now().date_naive().to_string();
    run_ok(&db, &["hours", "submit", "--date", &today, "--hours", "8"]);

    tt().args(["--db", &db, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Worker dashboard, Test U."))
        .stdout(contains("Crew: Framing A"))
        .stdout(contains("Entries: 1   Hours: 8   Earnings: $160.00"));

    login(&db, "foreman@example.com", "worker-pass");
    tt().args(["--db", &db, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Foreman dashboard"))
        .stdout(contains("No job logs yet."));
}
