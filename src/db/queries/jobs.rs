use super::collect;
use crate::models::job::{JobTemplate, JobTemplateUpdate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<JobTemplate> {
    Ok(JobTemplate {
        id: row.get("id")?,
        job_name: row.get("job_name")?,
        active: row.get::<_, i32>("active")? == 1,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert(conn: &Connection, id: &str, job_name: &str, active: bool, now: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO jobs (id, job_name, active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![id, job_name, if active { 1 } else { 0 }, now],
    )?;
    Ok(())
}

/// All templates by name; `active_only` restricts to the foreman view.
pub fn list(conn: &Connection, active_only: bool) -> Result<Vec<JobTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM jobs
         WHERE (?1 = 0 OR active = 1)
         ORDER BY job_name ASC",
    )?;
    let rows = stmt.query_map([active_only as i32], map_row)?;
    collect(rows)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<JobTemplate>> {
    conn.query_row("SELECT * FROM jobs WHERE id = ?1", [id], map_row)
        .optional()
}

pub fn update(conn: &Connection, id: &str, u: &JobTemplateUpdate, now: &str) -> Result<usize> {
    conn.execute(
        "UPDATE jobs
         SET job_name = COALESCE(?1, job_name),
             active = COALESCE(?2, active),
             updated_at = ?3
         WHERE id = ?4",
        params![u.job_name, u.active.map(|a| if a { 1 } else { 0 }), now, id],
    )
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM jobs WHERE id = ?1", [id])
}
