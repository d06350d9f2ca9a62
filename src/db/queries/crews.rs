use super::collect;
use crate::models::crew::{Crew, CrewInput};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT: &str = "SELECT c.id, c.name, c.trade_id, t.trade_name, c.created_at, c.updated_at
     FROM crews c
     LEFT JOIN trades t ON t.id = c.trade_id";

fn map_row(row: &Row) -> Result<Crew> {
    Ok(Crew {
        id: row.get("id")?,
        name: row.get("name")?,
        trade_id: row.get("trade_id")?,
        trade_name: row.get("trade_name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<Crew>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY c.name ASC"))?;
    let rows = stmt.query_map([], map_row)?;
    collect(rows)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Crew>> {
    conn.query_row(&format!("{SELECT} WHERE c.id = ?1"), [id], map_row)
        .optional()
}

pub fn insert(conn: &Connection, id: &str, input: &CrewInput, now: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO crews (id, name, trade_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![id, input.name, input.trade_id, now],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, id: &str, input: &CrewInput, now: &str) -> Result<usize> {
    conn.execute(
        "UPDATE crews SET name = ?1, trade_id = ?2, updated_at = ?3 WHERE id = ?4",
        params![input.name, input.trade_id, now, id],
    )
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM crews WHERE id = ?1", [id])
}
