use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::hours;
use crate::db::{self, new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::hours::{Hours, HoursInput, HoursWithWorker};
use crate::models::role::Role;
use crate::models::session::Session;
use crate::utils::date::DateRange;

pub const MAX_HOURS_PER_DAY: f64 = 24.0;

pub struct HoursLogic;

pub fn validate_hours(value: f64) -> AppResult<f64> {
    if !value.is_finite() || value <= 0.0 || value > MAX_HOURS_PER_DAY {
        return Err(AppError::InvalidInput(format!(
            "hours must be greater than 0 and at most {MAX_HOURS_PER_DAY} (got {value})"
        )));
    }
    Ok(value)
}

fn map_duplicate(e: rusqlite::Error) -> AppError {
    if db::is_unique_violation(&e) {
        AppError::HoursAlreadySubmitted
    } else {
        AppError::Db(e)
    }
}

impl HoursLogic {
    /// One entry per worker and day.
    pub fn submit(pool: &mut DbPool, session: &Session, input: &HoursInput) -> AppResult<Hours> {
        session.require_any(&[Role::Worker, Role::Foreman])?;
        let hours_worked = validate_hours(input.hours_worked)?;
        let notes = super::optional(input.notes.as_deref());

        if hours::find_for_date(&pool.conn, session.user_id(), &input.date_worked)?.is_some() {
            return Err(AppError::HoursAlreadySubmitted);
        }

        let id = new_id();
        hours::insert(
            &pool.conn,
            &id,
            session.user_id(),
            &input.date_worked,
            hours_worked,
            notes.as_deref(),
            &now_ts(),
        )
        .map_err(map_duplicate)?;
        ttlog(
            &pool.conn,
            "hours_submit",
            &id,
            &format!("{hours_worked}h on {}", input.date_worked),
        )?;

        fetch(pool, &id)
    }

    pub fn update(pool: &mut DbPool, session: &Session, id: &str, input: &HoursInput) -> AppResult<Hours> {
        let existing = owned(pool, session, id)?;
        let hours_worked = validate_hours(input.hours_worked)?;
        let notes = super::optional(input.notes.as_deref());

        hours::update(
            &pool.conn,
            &existing.id,
            &input.date_worked,
            hours_worked,
            notes.as_deref(),
            &now_ts(),
        )
        .map_err(map_duplicate)?;
        ttlog(
            &pool.conn,
            "hours_update",
            id,
            &format!("{hours_worked}h on {}", input.date_worked),
        )?;

        fetch(pool, id)
    }

    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        let existing = owned(pool, session, id)?;
        hours::delete(&pool.conn, &existing.id)?;
        ttlog(
            &pool.conn,
            "hours_delete",
            id,
            &format!("Entry for {} deleted", existing.date_worked),
        )?;
        Ok(())
    }

    pub fn get_own(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<Hours> {
        owned(pool, session, id)
    }

    pub fn list_own(pool: &mut DbPool, session: &Session, range: &DateRange) -> AppResult<Vec<Hours>> {
        session.require_any(&[Role::Worker, Role::Foreman])?;
        Ok(hours::list_by_worker(
            &pool.conn,
            session.user_id(),
            range.from,
            range.to,
        )?)
    }

    pub fn list_all(pool: &mut DbPool, session: &Session, range: &DateRange) -> AppResult<Vec<HoursWithWorker>> {
        session.require_admin()?;
        Ok(hours::list_all(&pool.conn, range.from, range.to)?)
    }
}

fn fetch(pool: &mut DbPool, id: &str) -> AppResult<Hours> {
    hours::get(&pool.conn, id)?.ok_or_else(|| AppError::NotFound {
        entity: "hours entry",
        id: id.to_string(),
    })
}

/// Entry owned by the session user; anyone else's entry is forbidden.
fn owned(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<Hours> {
    let entry = fetch(pool, id)?;
    if entry.worker_id != session.user_id() {
        return Err(AppError::Forbidden(
            "only the worker who submitted these hours can change them".into(),
        ));
    }
    Ok(entry)
}
