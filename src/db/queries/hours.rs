use super::{collect, date_col, date_to_sql, opt_date_to_sql};
use crate::models::compliance::WorkedHours;
use crate::models::hours::{Hours, HoursWithWorker};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

fn map_row(row: &Row) -> Result<Hours> {
    Ok(Hours {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        date_worked: date_col(row, "date_worked")?,
        hours_worked: row.get("hours_worked")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn map_with_worker(row: &Row) -> Result<HoursWithWorker> {
    Ok(HoursWithWorker {
        hours: map_row(row)?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        hourly_rate: row.get("hourly_rate")?,
        crew_id: row.get("crew_id")?,
        crew_name: row.get("crew_name")?,
    })
}

pub fn insert(
    conn: &Connection,
    id: &str,
    worker_id: &str,
    date_worked: &NaiveDate,
    hours_worked: f64,
    notes: Option<&str>,
    now: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO hours (id, worker_id, date_worked, hours_worked, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![id, worker_id, date_to_sql(date_worked), hours_worked, notes, now],
    )?;
    Ok(())
}

/// Existing entry id for (worker, date), if any.
pub fn find_for_date(conn: &Connection, worker_id: &str, date: &NaiveDate) -> Result<Option<String>> {
    conn.query_row(
        "SELECT id FROM hours WHERE worker_id = ?1 AND date_worked = ?2",
        params![worker_id, date_to_sql(date)],
        |row| row.get(0),
    )
    .optional()
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Hours>> {
    conn.query_row("SELECT * FROM hours WHERE id = ?1", [id], map_row)
        .optional()
}

pub fn update(
    conn: &Connection,
    id: &str,
    date_worked: &NaiveDate,
    hours_worked: f64,
    notes: Option<&str>,
    now: &str,
) -> Result<usize> {
    conn.execute(
        "UPDATE hours
         SET date_worked = ?1, hours_worked = ?2, notes = ?3, updated_at = ?4
         WHERE id = ?5",
        params![date_to_sql(date_worked), hours_worked, notes, now, id],
    )
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM hours WHERE id = ?1", [id])
}

/// One worker's entries, newest first.
pub fn list_by_worker(
    conn: &Connection,
    worker_id: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Hours>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM hours
         WHERE worker_id = ?1
           AND (?2 IS NULL OR date_worked >= ?2)
           AND (?3 IS NULL OR date_worked <= ?3)
         ORDER BY date_worked DESC",
    )?;
    let rows = stmt.query_map(
        params![worker_id, opt_date_to_sql(from), opt_date_to_sql(to)],
        map_row,
    )?;
    collect(rows)
}

/// Every entry joined with its worker and crew, newest first.
pub fn list_all(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<HoursWithWorker>> {
    let mut stmt = conn.prepare(
        "SELECT h.*, p.first_name, p.last_name, p.email, p.hourly_rate, p.crew_id,
                c.name AS crew_name
         FROM hours h
         JOIN profiles p ON p.id = h.worker_id
         LEFT JOIN crews c ON c.id = p.crew_id
         WHERE (?1 IS NULL OR h.date_worked >= ?1)
           AND (?2 IS NULL OR h.date_worked <= ?2)
         ORDER BY h.date_worked DESC",
    )?;
    let rows = stmt.query_map(
        params![opt_date_to_sql(from), opt_date_to_sql(to)],
        map_with_worker,
    )?;
    collect(rows)
}

/// Hours of the given workers inside `[from, to]`, oldest first.
pub fn list_for_workers(
    conn: &Connection,
    worker_ids: &[String],
    from: &NaiveDate,
    to: &NaiveDate,
) -> Result<Vec<WorkedHours>> {
    if worker_ids.is_empty() {
        return Ok(Vec::new());
    }

    // ?1 and ?2 are the bounds, worker ids follow.
    let placeholders: Vec<String> = (0..worker_ids.len())
        .map(|i| format!("?{}", i + 3))
        .collect();

    let sql = format!(
        "SELECT worker_id, hours_worked FROM hours
         WHERE date_worked >= ?1 AND date_worked <= ?2
           AND worker_id IN ({})
         ORDER BY date_worked ASC, created_at ASC",
        placeholders.join(",")
    );

    let mut values: Vec<String> = vec![date_to_sql(from), date_to_sql(to)];
    values.extend(worker_ids.iter().cloned());

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(WorkedHours {
            worker_id: row.get(0)?,
            hours_worked: row.get(1)?,
        })
    })?;
    collect(rows)
}
