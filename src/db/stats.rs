use crate::db::migrate;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const COUNTED_TABLES: &[(&str, &str)] = &[
    ("profiles", "Users"),
    ("crews", "Crews"),
    ("trades", "Trades"),
    ("jobs", "Job templates"),
    ("job_elevations", "Elevations"),
    ("job_logs", "Job logs"),
    ("hours", "Hours entries"),
    ("legacy_jobs", "Legacy jobs"),
];

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) SCHEMA VERSION
    //
    let applied = migrate::applied_versions(&pool.conn)?;
    let current = applied
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!(
        "{}• Schema:{} {} (latest known: {})",
        CYAN,
        RESET,
        current,
        migrate::latest_version()
    );

    //
    // 3) ROW COUNTS
    //
    for (table, label) in COUNTED_TABLES {
        let count: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 4) DATE RANGE OF LOGGED WORK
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(date_worked) FROM job_logs",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();
    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MAX(date_worked) FROM job_logs",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    println!("{}• Logged work:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
