use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use ansi_term::Colour;
use regex::Regex;

/// Colour of an audit operation, by its verb suffix.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        "login" | "logout" => Colour::Cyan,
        "error" | "login_failed" => Colour::Red,
        other if other.ends_with("_create") || other.ends_with("_submit") => Colour::Green,
        other if other.ends_with("_delete") => Colour::Red,
        other if other.ends_with("_update") => Colour::Yellow,
        _ => Colour::White,
    }
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Audit rows, oldest first; `limit` keeps only the newest ones.
    pub fn entries(pool: &mut DbPool, session: &Session, limit: Option<usize>) -> AppResult<Vec<LogEntry>> {
        session.require_admin()?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, COALESCE(target, ''), message
             FROM (SELECT * FROM log ORDER BY id DESC LIMIT ?1)
             ORDER BY id ASC",
        )?;
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let rows = stmt.query_map([limit], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn print_log(pool: &mut DbPool, session: &Session, limit: Option<usize>) -> AppResult<()> {
        let entries = Self::entries(pool, session, limit)?;
        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len() + 1 + short_target(&e.target).len())
            .max()
            .unwrap_or(10)
            .min(60);

        println!("📜 Internal log:\n");

        for e in entries {
            let color = color_for_operation(&e.operation);
            let target = short_target(&e.target);
            let op_target = if target.is_empty() {
                color.paint(e.operation.as_str()).to_string()
            } else {
                format!("{} {}", color.paint(e.operation.as_str()), target)
            };

            // pad on the visible width, not on the escape codes
            let visible = ansi.replace_all(&op_target, "").chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                op_target,
                padding,
                ansi.replace_all(&e.message, ""),
            );
        }

        Ok(())
    }
}

/// Ids are long UUIDs; the first block is enough to tell rows apart.
fn short_target(target: &str) -> String {
    if target.is_empty() {
        return String::new();
    }
    let short = if uuid::Uuid::parse_str(target).is_ok() {
        target.split('-').next().unwrap_or(target).to_string()
    } else if target.chars().count() > 40 {
        let mut s: String = target.chars().take(37).collect();
        s.push_str("...");
        s
    } else {
        target.to_string()
    };
    format!("({short})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_targets_are_shortened() {
        assert_eq!(
            short_target("0b8f2c1e-7a4d-4c53-9d8e-1f2a3b4c5d6e"),
            "(0b8f2c1e)"
        );
        assert_eq!(short_target(""), "");
        assert_eq!(short_target("hours"), "(hours)");
    }
}
