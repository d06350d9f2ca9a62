use super::calculator::stats;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::job_logs::{self, JobLogFilter};
use crate::db::queries::{elevations, jobs};
use crate::db::{new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::job_log::{JobLog, JobLogGroup, JobLogInput};
use crate::models::role::Role;
use crate::models::session::Session;
use crate::models::stats::JobStats;
use crate::utils::date::{DateRange, today};

pub struct JobLogLogic;

fn filter(crew_id: Option<&str>, job_id: Option<&str>, range: &DateRange) -> JobLogFilter {
    JobLogFilter {
        crew_id: crew_id.map(str::to_string),
        job_id: job_id.map(str::to_string),
        from: range.from,
        to: range.to,
    }
}

impl JobLogLogic {
    /// Foreman records work for their own crew. The elevation must belong
    /// to the chosen job; the date defaults to today.
    pub fn create(pool: &mut DbPool, session: &Session, input: &JobLogInput) -> AppResult<JobLog> {
        session.require_any(&[Role::Foreman])?;
        let crew_id = session.crew_id()?.to_string();

        let job_id = super::required(&input.job_id, "job_id")?;
        let elevation_id = super::required(&input.elevation_id, "elevation_id")?;
        let lot = super::required(&input.lot, "lot")?;
        let notes = super::optional(input.notes.as_deref());
        let date_worked = input.date_worked.unwrap_or_else(today);

        let job = jobs::get(&pool.conn, &job_id)?.ok_or_else(|| AppError::NotFound {
            entity: "job template",
            id: job_id.clone(),
        })?;
        if !job.active {
            return Err(AppError::InvalidInput(format!(
                "job template '{}' is archived",
                job.job_name
            )));
        }

        let elevation = elevations::get(&pool.conn, &elevation_id)?.ok_or_else(|| AppError::NotFound {
            entity: "elevation",
            id: elevation_id.clone(),
        })?;
        if elevation.job_id != job_id {
            return Err(AppError::InvalidInput(format!(
                "elevation '{}' does not belong to job '{}'",
                elevation.elevation_name, job.job_name
            )));
        }

        let id = new_id();
        job_logs::insert(
            &pool.conn,
            &id,
            &job_id,
            &elevation_id,
            &crew_id,
            session.user_id(),
            &lot,
            &date_worked,
            notes.as_deref(),
            &now_ts(),
        )?;
        ttlog(
            &pool.conn,
            "job_log_create",
            &id,
            &format!("{} / {} lot {} on {}", job.job_name, elevation.elevation_name, lot, date_worked),
        )?;

        job_logs::get(&pool.conn, &id)?.ok_or(AppError::NotFound {
            entity: "job log",
            id,
        })
    }

    /// Logs of one crew. Foremen are pinned to their own crew, admins must
    /// name one.
    pub fn list_for_crew(
        pool: &mut DbPool,
        session: &Session,
        crew_id: Option<&str>,
        range: &DateRange,
    ) -> AppResult<Vec<JobLog>> {
        let crew = resolve_crew(session, crew_id)?;
        Ok(job_logs::list(&pool.conn, &filter(Some(&crew), None, range))?)
    }

    pub fn list_all(pool: &mut DbPool, session: &Session, range: &DateRange) -> AppResult<Vec<JobLog>> {
        session.require_admin()?;
        Ok(job_logs::list(&pool.conn, &filter(None, None, range))?)
    }

    pub fn list_by_job(
        pool: &mut DbPool,
        session: &Session,
        job_id: &str,
        range: &DateRange,
    ) -> AppResult<Vec<JobLog>> {
        session.require_admin()?;
        Ok(job_logs::list(&pool.conn, &filter(None, Some(job_id), range))?)
    }

    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin()?;
        let affected = job_logs::delete(&pool.conn, id)?;
        super::expect_row(affected, "job log", id)?;
        ttlog(&pool.conn, "job_log_delete", id, "Job log deleted")?;
        Ok(())
    }

    /// Count, yardage and revenue: admins over everything or one crew,
    /// foremen over their own crew.
    pub fn stats(
        pool: &mut DbPool,
        session: &Session,
        crew_id: Option<&str>,
        range: &DateRange,
    ) -> AppResult<JobStats> {
        let crew = if session.is_admin() {
            crew_id.map(str::to_string)
        } else {
            Some(resolve_crew(session, crew_id)?)
        };
        let logs = job_logs::list(&pool.conn, &filter(crew.as_deref(), None, range))?;
        Ok(stats::job_log_stats(&logs))
    }

    pub fn grouped_by_job(
        pool: &mut DbPool,
        session: &Session,
        range: &DateRange,
    ) -> AppResult<Vec<JobLogGroup>> {
        session.require_admin()?;
        let logs = job_logs::list_by_job_name(&pool.conn, &filter(None, None, range))?;
        Ok(stats::group_by_job(logs))
    }
}

fn resolve_crew(session: &Session, crew_id: Option<&str>) -> AppResult<String> {
    session.require_any(&[Role::Admin, Role::Foreman])?;

    if session.is_admin() {
        return crew_id
            .map(str::to_string)
            .ok_or(AppError::MissingField("crew_id"));
    }

    let own = session.crew_id()?;
    match crew_id {
        Some(other) if other != own => Err(AppError::Forbidden(
            "foremen can only view their own crew".into(),
        )),
        _ => Ok(own.to_string()),
    }
}
