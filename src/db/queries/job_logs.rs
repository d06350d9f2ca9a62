use super::{collect, date_col, date_to_sql, opt_date_to_sql};
use crate::models::job_log::JobLog;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT: &str = "SELECT l.id, l.job_id, l.elevation_id, l.crew_id, l.created_by, l.lot,
            l.date_worked, l.notes, l.created_at, l.updated_at,
            j.job_name, j.active AS job_active,
            e.elevation_name, e.yardage, e.rate, e.total,
            c.name AS crew_name, t.trade_name,
            p.first_name AS creator_first_name, p.last_name AS creator_last_name,
            p.email AS creator_email
     FROM job_logs l
     JOIN jobs j ON j.id = l.job_id
     JOIN job_elevations e ON e.id = l.elevation_id
     JOIN crews c ON c.id = l.crew_id
     LEFT JOIN trades t ON t.id = c.trade_id
     JOIN profiles p ON p.id = l.created_by";

/// Optional filters; every `None` disables its condition.
#[derive(Debug, Clone, Default)]
pub struct JobLogFilter {
    pub crew_id: Option<String>,
    pub job_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn map_row(row: &Row) -> Result<JobLog> {
    Ok(JobLog {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        elevation_id: row.get("elevation_id")?,
        crew_id: row.get("crew_id")?,
        created_by: row.get("created_by")?,
        lot: row.get("lot")?,
        date_worked: date_col(row, "date_worked")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        job_name: row.get("job_name")?,
        job_active: row.get::<_, i32>("job_active")? == 1,
        elevation_name: row.get("elevation_name")?,
        yardage: row.get("yardage")?,
        rate: row.get("rate")?,
        total: row.get("total")?,
        crew_name: row.get("crew_name")?,
        trade_name: row.get("trade_name")?,
        creator_first_name: row.get("creator_first_name")?,
        creator_last_name: row.get("creator_last_name")?,
        creator_email: row.get("creator_email")?,
    })
}

#[allow(clippy::too_many_arguments)]
pub fn insert(
    conn: &Connection,
    id: &str,
    job_id: &str,
    elevation_id: &str,
    crew_id: &str,
    created_by: &str,
    lot: &str,
    date_worked: &NaiveDate,
    notes: Option<&str>,
    now: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO job_logs
            (id, job_id, elevation_id, crew_id, created_by, lot, date_worked, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            id,
            job_id,
            elevation_id,
            crew_id,
            created_by,
            lot,
            date_to_sql(date_worked),
            notes,
            now
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<JobLog>> {
    conn.query_row(&format!("{SELECT} WHERE l.id = ?1"), [id], map_row)
        .optional()
}

/// Newest first.
pub fn list(conn: &Connection, f: &JobLogFilter) -> Result<Vec<JobLog>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT}
         WHERE (?1 IS NULL OR l.crew_id = ?1)
           AND (?2 IS NULL OR l.job_id = ?2)
           AND (?3 IS NULL OR l.date_worked >= ?3)
           AND (?4 IS NULL OR l.date_worked <= ?4)
         ORDER BY l.date_worked DESC, l.created_at DESC"
    ))?;
    let rows = stmt.query_map(
        params![f.crew_id, f.job_id, opt_date_to_sql(f.from), opt_date_to_sql(f.to)],
        map_row,
    )?;
    collect(rows)
}

/// Ordered by job name, then newest first, ready for grouping.
pub fn list_by_job_name(conn: &Connection, f: &JobLogFilter) -> Result<Vec<JobLog>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT}
         WHERE (?1 IS NULL OR l.crew_id = ?1)
           AND (?2 IS NULL OR l.job_id = ?2)
           AND (?3 IS NULL OR l.date_worked >= ?3)
           AND (?4 IS NULL OR l.date_worked <= ?4)
         ORDER BY j.job_name ASC, l.date_worked DESC"
    ))?;
    let rows = stmt.query_map(
        params![f.crew_id, f.job_id, opt_date_to_sql(f.from), opt_date_to_sql(f.to)],
        map_row,
    )?;
    collect(rows)
}

/// Elevation totals of the crew's logs inside `[from, to]`.
pub fn revenue_for_crew(
    conn: &Connection,
    crew_id: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> Result<Vec<f64>> {
    let mut stmt = conn.prepare(
        "SELECT e.total
         FROM job_logs l
         JOIN job_elevations e ON e.id = l.elevation_id
         WHERE l.crew_id = ?1 AND l.date_worked >= ?2 AND l.date_worked <= ?3",
    )?;
    let rows = stmt.query_map(
        params![crew_id, date_to_sql(from), date_to_sql(to)],
        |row| row.get::<_, f64>(0),
    )?;
    collect(rows)
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM job_logs WHERE id = ?1", [id])
}
