use super::collect;
use crate::models::job::{ElevationInput, ElevationUpdate, JobElevation};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<JobElevation> {
    Ok(JobElevation {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        elevation_name: row.get("elevation_name")?,
        yardage: row.get("yardage")?,
        rate: row.get("rate")?,
        total: row.get("total")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

// `total` is a generated column and is never written here.
pub fn insert(conn: &Connection, id: &str, input: &ElevationInput, now: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO job_elevations (id, job_id, elevation_name, yardage, rate, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            id,
            input.job_id,
            input.elevation_name,
            input.yardage,
            input.rate,
            now
        ],
    )?;
    Ok(())
}

pub fn list_by_job(conn: &Connection, job_id: &str) -> Result<Vec<JobElevation>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM job_elevations WHERE job_id = ?1 ORDER BY elevation_name ASC",
    )?;
    let rows = stmt.query_map([job_id], map_row)?;
    collect(rows)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<JobElevation>> {
    conn.query_row("SELECT * FROM job_elevations WHERE id = ?1", [id], map_row)
        .optional()
}

pub fn update(conn: &Connection, id: &str, u: &ElevationUpdate, now: &str) -> Result<usize> {
    conn.execute(
        "UPDATE job_elevations
         SET elevation_name = COALESCE(?1, elevation_name),
             yardage = COALESCE(?2, yardage),
             rate = COALESCE(?3, rate),
             updated_at = ?4
         WHERE id = ?5",
        params![u.elevation_name, u.yardage, u.rate, now, id],
    )
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM job_elevations WHERE id = ?1", [id])
}
