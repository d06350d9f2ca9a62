use super::{collect, date_col, date_to_sql, opt_date_to_sql};
use crate::models::legacy_job::{LegacyJob, LegacyJobInput};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT: &str = "SELECT lj.*, c.name AS crew_name
     FROM legacy_jobs lj
     LEFT JOIN crews c ON c.id = lj.crew_id";

fn map_row(row: &Row) -> Result<LegacyJob> {
    Ok(LegacyJob {
        id: row.get("id")?,
        date: date_col(row, "date")?,
        job_name: row.get("job_name")?,
        elevation: row.get("elevation")?,
        lot_address: row.get("lot_address")?,
        yardage: row.get("yardage")?,
        rate: row.get("rate")?,
        total: row.get("total")?,
        crew_id: row.get("crew_id")?,
        crew_name: row.get("crew_name")?,
        created_by: row.get("created_by")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(
    conn: &Connection,
    id: &str,
    input: &LegacyJobInput,
    date: &NaiveDate,
    crew_id: &str,
    created_by: &str,
    now: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO legacy_jobs
            (id, date, job_name, elevation, lot_address, yardage, rate, crew_id, created_by, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            id,
            date_to_sql(date),
            input.job_name,
            input.elevation,
            input.lot_address,
            input.yardage,
            input.rate,
            crew_id,
            created_by,
            input.notes,
            now
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<LegacyJob>> {
    conn.query_row(&format!("{SELECT} WHERE lj.id = ?1"), [id], map_row)
        .optional()
}

/// Newest first; `limit` of `None` returns every row.
pub fn list(
    conn: &Connection,
    crew_id: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: Option<usize>,
) -> Result<Vec<LegacyJob>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT}
         WHERE (?1 IS NULL OR lj.crew_id = ?1)
           AND (?2 IS NULL OR lj.date >= ?2)
           AND (?3 IS NULL OR lj.date <= ?3)
         ORDER BY lj.date DESC, lj.created_at DESC
         LIMIT ?4"
    ))?;
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let rows = stmt.query_map(
        params![crew_id, opt_date_to_sql(from), opt_date_to_sql(to), limit],
        map_row,
    )?;
    collect(rows)
}

/// Job totals of the crew inside `[from, to]`.
pub fn revenue_for_crew(
    conn: &Connection,
    crew_id: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> Result<Vec<f64>> {
    let mut stmt = conn.prepare(
        "SELECT total FROM legacy_jobs
         WHERE crew_id = ?1 AND date >= ?2 AND date <= ?3",
    )?;
    let rows = stmt.query_map(
        params![crew_id, date_to_sql(from), date_to_sql(to)],
        |row| row.get::<_, f64>(0),
    )?;
    collect(rows)
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM legacy_jobs WHERE id = ?1", [id])
}
