//! SQLite connection wrapper (one connection per command).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::configure(conn)
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self> {
        // Referential integrity (trades ← crews, jobs ← elevations ← logs)
        // is enforced by SQLite itself.
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }
}
