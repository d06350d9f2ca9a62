use super::{collect, role_col};
use crate::models::compliance::CrewMember;
use crate::models::profile::{AdminProfileUpdate, Profile, ProfileUpdate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT: &str = "SELECT p.id, p.email, p.first_name, p.last_name, p.phone_number,
            p.role, p.crew_id, c.name AS crew_name, p.hourly_rate,
            p.created_at, p.updated_at
     FROM profiles p
     LEFT JOIN crews c ON c.id = p.crew_id";

pub fn map_row(row: &Row) -> Result<Profile> {
    Ok(Profile {
        id: row.get("id")?,
        email: row.get("email")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone_number: row.get("phone_number")?,
        role: role_col(row, "role")?,
        crew_id: row.get("crew_id")?,
        crew_name: row.get("crew_name")?,
        hourly_rate: row.get("hourly_rate")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Base profile row created together with the account (role `worker`).
pub fn insert_base(conn: &Connection, id: &str, email: &str, now: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO profiles (id, email, role, created_at, updated_at)
         VALUES (?1, ?2, 'worker', ?3, ?3)",
        params![id, email, now],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Profile>> {
    conn.query_row(&format!("{SELECT} WHERE p.id = ?1"), [id], map_row)
        .optional()
}

pub fn list_all(conn: &Connection) -> Result<Vec<Profile>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY p.created_at DESC"))?;
    let rows = stmt.query_map([], map_row)?;
    collect(rows)
}

pub fn list_crew_members(conn: &Connection, crew_id: &str) -> Result<Vec<CrewMember>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, hourly_rate
         FROM profiles
         WHERE crew_id = ?1",
    )?;
    let rows = stmt.query_map([crew_id], |row| {
        Ok(CrewMember {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            hourly_rate: row.get(3)?,
        })
    })?;
    collect(rows)
}

/// Admin update; `None` keeps the column, `Some(None)` clears it.
pub fn update_admin(conn: &Connection, id: &str, u: &AdminProfileUpdate, now: &str) -> Result<usize> {
    conn.execute(
        "UPDATE profiles
         SET first_name   = COALESCE(?1, first_name),
             last_name    = COALESCE(?2, last_name),
             phone_number = CASE WHEN ?3 THEN ?4 ELSE phone_number END,
             role         = COALESCE(?5, role),
             crew_id      = CASE WHEN ?6 THEN ?7 ELSE crew_id END,
             hourly_rate  = CASE WHEN ?8 THEN ?9 ELSE hourly_rate END,
             updated_at   = ?10
         WHERE id = ?11",
        params![
            u.first_name,
            u.last_name,
            u.phone_number.is_some(),
            u.phone_number.clone().flatten(),
            u.role.map(|r| r.to_db_str()),
            u.crew_id.is_some(),
            u.crew_id.clone().flatten(),
            u.hourly_rate.is_some(),
            u.hourly_rate.flatten(),
            now,
            id,
        ],
    )
}

/// Self-service update (names and phone only).
pub fn update_self(conn: &Connection, id: &str, u: &ProfileUpdate, now: &str) -> Result<usize> {
    conn.execute(
        "UPDATE profiles
         SET first_name   = COALESCE(?1, first_name),
             last_name    = COALESCE(?2, last_name),
             phone_number = ?3,
             updated_at   = ?4
         WHERE id = ?5",
        params![u.first_name, u.last_name, u.phone_number, now, id],
    )
}
