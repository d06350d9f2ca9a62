//! One module per table. Every function runs a single SQL statement.

pub mod auth;
pub mod crews;
pub mod elevations;
pub mod hours;
pub mod job_logs;
pub mod jobs;
pub mod legacy_jobs;
pub mod profiles;
pub mod trades;

use crate::models::role::Role;
use chrono::NaiveDate;
use rusqlite::Row;

pub(crate) const DATE_FMT: &str = "%Y-%m-%d";

pub(crate) fn date_to_sql(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub(crate) fn opt_date_to_sql(d: Option<NaiveDate>) -> Option<String> {
    d.as_ref().map(date_to_sql)
}

/// Read a `YYYY-MM-DD` text column.
pub(crate) fn date_col(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid date: {raw}").into(),
        )
    })
}

pub(crate) fn role_col(row: &Row, col: &str) -> rusqlite::Result<Role> {
    let raw: String = row.get(col)?;
    Role::from_db_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid role: {raw}").into(),
        )
    })
}

pub(crate) fn collect<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> rusqlite::Result<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
