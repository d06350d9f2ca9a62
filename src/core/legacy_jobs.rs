use super::calculator::stats;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::legacy_jobs;
use crate::db::{new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::legacy_job::{LegacyJob, LegacyJobInput};
use crate::models::role::Role;
use crate::models::session::Session;
use crate::models::stats::JobStats;
use crate::utils::date::{DateRange, today};

pub struct LegacyJobLogic;

impl LegacyJobLogic {
    /// Recorded against the foreman's crew; `total` is computed by the store.
    pub fn create(pool: &mut DbPool, session: &Session, input: &LegacyJobInput) -> AppResult<LegacyJob> {
        session.require_any(&[Role::Foreman])?;
        let crew_id = session.crew_id()?.to_string();

        let cleaned = LegacyJobInput {
            job_name: super::required(&input.job_name, "job_name")?,
            elevation: super::optional(input.elevation.as_deref()),
            lot_address: super::optional(input.lot_address.as_deref()),
            yardage: super::non_negative(input.yardage, "yardage")?,
            rate: super::non_negative(input.rate, "rate")?,
            notes: super::optional(input.notes.as_deref()),
            date: input.date,
        };
        let date = cleaned.date.unwrap_or_else(today);

        let id = new_id();
        legacy_jobs::insert(
            &pool.conn,
            &id,
            &cleaned,
            &date,
            &crew_id,
            session.user_id(),
            &now_ts(),
        )?;
        ttlog(
            &pool.conn,
            "legacy_job_create",
            &id,
            &format!("{} on {}", cleaned.job_name, date),
        )?;

        legacy_jobs::get(&pool.conn, &id)?.ok_or(AppError::NotFound {
            entity: "legacy job",
            id,
        })
    }

    /// Admins see every crew (or the one asked for); foremen see their own.
    pub fn list(
        pool: &mut DbPool,
        session: &Session,
        crew_id: Option<&str>,
        range: &DateRange,
        limit: Option<usize>,
    ) -> AppResult<Vec<LegacyJob>> {
        session.require_any(&[Role::Admin, Role::Foreman])?;

        let crew = if session.is_admin() {
            crew_id.map(str::to_string)
        } else {
            Some(session.crew_id()?.to_string())
        };

        Ok(legacy_jobs::list(
            &pool.conn,
            crew.as_deref(),
            range.from,
            range.to,
            limit,
        )?)
    }

    pub fn stats(
        pool: &mut DbPool,
        session: &Session,
        crew_id: Option<&str>,
        range: &DateRange,
    ) -> AppResult<JobStats> {
        let rows = Self::list(pool, session, crew_id, range, None)?;
        Ok(stats::legacy_job_stats(&rows))
    }

    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin()?;
        let affected = legacy_jobs::delete(&pool.conn, id)?;
        super::expect_row(affected, "legacy job", id)?;
        ttlog(&pool.conn, "legacy_job_delete", id, "Legacy job deleted")?;
        Ok(())
    }
}
