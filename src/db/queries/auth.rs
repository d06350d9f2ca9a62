use rusqlite::{Connection, OptionalExtension, Result, params};

pub struct AuthUserRow {
    pub id: String,
    pub password_hash: String,
}

pub fn insert_user(
    conn: &Connection,
    id: &str,
    email: &str,
    password_hash: &str,
    created_at: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO auth_users (id, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![id, email, password_hash, created_at],
    )?;
    Ok(())
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<AuthUserRow>> {
    conn.query_row(
        "SELECT id, password_hash FROM auth_users WHERE email = ?1 COLLATE NOCASE",
        [email],
        |row| {
            Ok(AuthUserRow {
                id: row.get(0)?,
                password_hash: row.get(1)?,
            })
        },
    )
    .optional()
}

pub fn count_users(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM auth_users", [], |row| row.get(0))
}

pub fn insert_session(
    conn: &Connection,
    token: &str,
    user_id: &str,
    created_at: &str,
    expires_at: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![token, user_id, created_at, expires_at],
    )?;
    Ok(())
}

/// User owning a session token that has not expired at `now`.
pub fn session_user(conn: &Connection, token: &str, now: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT user_id FROM sessions WHERE token = ?1 AND expires_at > ?2",
        params![token, now],
        |row| row.get(0),
    )
    .optional()
}

pub fn delete_session(conn: &Connection, token: &str) -> Result<usize> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", [token])
}

pub fn purge_expired_sessions(conn: &Connection, now: &str) -> Result<usize> {
    conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", [now])
}
