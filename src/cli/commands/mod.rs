pub mod auth;
pub mod backup;
pub mod config;
pub mod crew;
pub mod dashboard;
pub mod db;
pub mod elevation;
pub mod export;
pub mod hours;
pub mod init;
pub mod job;
pub mod joblog;
pub mod legacy_job;
pub mod log;
pub mod profile;
pub mod report;
pub mod trade;
pub mod user;

use crate::cli::parser::FilterArgs;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use crate::utils::date::{self, DateRange};
use crate::utils::format_currency;
use crate::utils::table::Table;
use std::path::Path;

/// Open the configured database; it must have been created by `init`.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    if !Path::new(&cfg.database).exists() {
        return Err(AppError::Config(format!(
            "database not found at {} (run `tradetracker init` first)",
            cfg.database
        )));
    }
    Ok(DbPool::new(&cfg.database)?)
}

/// Database plus the session stored by `login`.
pub(crate) fn authenticate(cfg: &Config) -> AppResult<(DbPool, Session)> {
    let mut pool = open_pool(cfg)?;
    let session = AuthLogic::current(&mut pool, cfg)?;
    Ok((pool, session))
}

pub(crate) fn resolve_filters(f: &FilterArgs) -> AppResult<DateRange> {
    date::resolve_range(
        f.preset,
        f.period.as_deref(),
        f.from.as_deref(),
        f.to.as_deref(),
        date::today(),
    )
}

pub(crate) fn parse_opt_date(s: Option<&str>) -> AppResult<Option<chrono::NaiveDate>> {
    s.map(date::parse_date_arg).transpose()
}

pub(crate) fn money(cfg: &Config, value: f64) -> String {
    format_currency(value, &cfg.currency_symbol)
}

pub(crate) fn print_table(table: &Table, cfg: &Config, empty_msg: &str) {
    if table.is_empty() {
        crate::ui::messages::info(empty_msg);
        return;
    }
    print!("{}", table.render(&cfg.separator_char));
}
