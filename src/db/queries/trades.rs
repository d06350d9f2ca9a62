use super::collect;
use crate::models::trade::{Trade, TradeInput};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<Trade> {
    Ok(Trade {
        id: row.get("id")?,
        trade_name: row.get("trade_name")?,
        department_id: row.get("department_id")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<Trade>> {
    let mut stmt = conn.prepare("SELECT * FROM trades ORDER BY trade_name ASC")?;
    let rows = stmt.query_map([], map_row)?;
    collect(rows)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Trade>> {
    conn.query_row("SELECT * FROM trades WHERE id = ?1", [id], map_row)
        .optional()
}

pub fn insert(conn: &Connection, id: &str, input: &TradeInput, now: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO trades (id, trade_name, department_id, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![id, input.trade_name, input.department_id, input.description, now],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, id: &str, input: &TradeInput, now: &str) -> Result<usize> {
    conn.execute(
        "UPDATE trades
         SET trade_name = ?1, department_id = ?2, description = ?3, updated_at = ?4
         WHERE id = ?5",
        params![input.trade_name, input.department_id, input.description, now, id],
    )
}

pub fn delete(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM trades WHERE id = ?1", [id])
}
