use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step applied at most once, tracked in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_initial_schema",
        description: "Created accounts, profiles, trades, crews, jobs and hours tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS auth_users (
            id            TEXT PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
            token       TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES auth_users(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL,
            expires_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trades (
            id            TEXT PRIMARY KEY,
            trade_name    TEXT NOT NULL,
            department_id TEXT,
            description   TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS crews (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            trade_id    TEXT REFERENCES trades(id) ON DELETE RESTRICT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id            TEXT PRIMARY KEY REFERENCES auth_users(id) ON DELETE CASCADE,
            email         TEXT NOT NULL,
            first_name    TEXT NOT NULL DEFAULT '',
            last_name     TEXT NOT NULL DEFAULT '',
            phone_number  TEXT,
            role          TEXT NOT NULL DEFAULT 'worker'
                          CHECK(role IN ('admin','foreman','worker')),
            crew_id       TEXT REFERENCES crews(id) ON DELETE SET NULL,
            hourly_rate   REAL CHECK(hourly_rate IS NULL OR hourly_rate >= 0),
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS legacy_jobs (
            id           TEXT PRIMARY KEY,
            date         TEXT NOT NULL,
            job_name     TEXT NOT NULL,
            elevation    TEXT,
            lot_address  TEXT,
            yardage      REAL NOT NULL,
            rate         REAL NOT NULL,
            total        REAL GENERATED ALWAYS AS (yardage * rate) STORED,
            crew_id      TEXT NOT NULL REFERENCES crews(id),
            created_by   TEXT NOT NULL REFERENCES profiles(id),
            notes        TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS hours (
            id            TEXT PRIMARY KEY,
            worker_id     TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            date_worked   TEXT NOT NULL,
            hours_worked  REAL NOT NULL,
            notes         TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_profiles_crew ON profiles(crew_id);
        CREATE INDEX IF NOT EXISTS idx_legacy_jobs_crew_date ON legacy_jobs(crew_id, date);
        CREATE INDEX IF NOT EXISTS idx_hours_date ON hours(date_worked);
        "#,
    },
    Migration {
        version: "20250301_0002_job_templates",
        description: "Added job templates, elevations and job logs",
        sql: r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id          TEXT PRIMARY KEY,
            job_name    TEXT NOT NULL,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS job_elevations (
            id              TEXT PRIMARY KEY,
            job_id          TEXT NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
            elevation_name  TEXT NOT NULL,
            yardage         REAL NOT NULL,
            rate            REAL NOT NULL,
            total           REAL GENERATED ALWAYS AS (yardage * rate) STORED,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS job_logs (
            id            TEXT PRIMARY KEY,
            job_id        TEXT NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
            elevation_id  TEXT NOT NULL REFERENCES job_elevations(id),
            crew_id       TEXT NOT NULL REFERENCES crews(id),
            created_by    TEXT NOT NULL REFERENCES profiles(id),
            lot           TEXT,
            date_worked   TEXT NOT NULL,
            notes         TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_job_elevations_job ON job_elevations(job_id);
        CREATE INDEX IF NOT EXISTS idx_job_logs_crew_date ON job_logs(crew_id, date_worked);
        CREATE INDEX IF NOT EXISTS idx_job_logs_job ON job_logs(job_id);
        "#,
    },
    Migration {
        version: "20250315_0003_unique_hours_per_day",
        description: "Enforced one hours entry per worker and date",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_hours_worker_date
            ON hours(worker_id, date_worked);
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))
        .inspect_err(|_| {
            let _ = conn.execute_batch("ROLLBACK;");
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions already recorded in the audit log, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and `tradetracker db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}

/// Latest schema version this binary knows about.
pub fn latest_version() -> &'static str {
    MIGRATIONS.last().map(|m| m.version).unwrap_or("")
}
