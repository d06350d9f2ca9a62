//! Business logic: every action resolves its session, checks the role,
//! validates, runs the store operation(s) and writes an audit line.

pub mod auth;
pub mod backup;
pub mod calculator;
pub mod config;
pub mod crews;
pub mod dashboard;
pub mod elevations;
pub mod filters;
pub mod hours;
pub mod job_logs;
pub mod job_templates;
pub mod legacy_jobs;
pub mod log;
pub mod profile;
pub mod trades;
pub mod users;

use crate::db;
use crate::errors::{AppError, AppResult};

/// Trimmed, non-empty required text.
pub(crate) fn required(value: &str, field: &'static str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(v.to_string())
}

/// Trimmed optional text; blank becomes `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn non_negative(value: f64, field: &str) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "{field} must be zero or positive (got {value})"
        )));
    }
    Ok(value)
}

/// `NotFound` when an update/delete touched no row.
pub(crate) fn expect_row(affected: usize, entity: &'static str, id: &str) -> AppResult<()> {
    if affected == 0 {
        return Err(AppError::NotFound {
            entity,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Turn a foreign-key failure on delete into a readable rejection.
pub(crate) fn map_delete_error(e: rusqlite::Error, in_use: AppError) -> AppError {
    if db::is_foreign_key_violation(&e) {
        in_use
    } else {
        AppError::Db(e)
    }
}

/// Turn a foreign-key failure on insert/update into a missing-reference error.
pub(crate) fn map_reference_error(e: rusqlite::Error, what: &str) -> AppError {
    if db::is_foreign_key_violation(&e) {
        AppError::InvalidInput(format!("{what} does not exist"))
    } else {
        AppError::Db(e)
    }
}
