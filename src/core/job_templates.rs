use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{elevations, jobs};
use crate::db::{new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::job::{JobTemplate, JobTemplateUpdate, JobWithElevations};
use crate::models::role::Role;
use crate::models::session::Session;

pub struct JobTemplateLogic;

impl JobTemplateLogic {
    pub fn create(pool: &mut DbPool, session: &Session, job_name: &str, active: bool) -> AppResult<JobTemplate> {
        session.require_admin()?;
        let job_name = super::required(job_name, "job_name")?;
        let id = new_id();

        jobs::insert(&pool.conn, &id, &job_name, active, &now_ts())?;
        ttlog(&pool.conn, "job_create", &id, &format!("Job template '{job_name}' created"))?;

        fetch(pool, &id)
    }

    /// All templates for admins; foremen only see active ones.
    pub fn list(pool: &mut DbPool, session: &Session, active_only: bool) -> AppResult<Vec<JobTemplate>> {
        if active_only {
            session.require_any(&[Role::Admin, Role::Foreman])?;
        } else {
            session.require_admin()?;
        }
        Ok(jobs::list(&pool.conn, active_only)?)
    }

    pub fn list_with_elevations(
        pool: &mut DbPool,
        session: &Session,
        active_only: bool,
    ) -> AppResult<Vec<JobWithElevations>> {
        let templates = Self::list(pool, session, active_only)?;

        let mut out = Vec::with_capacity(templates.len());
        for job in templates {
            let job_elevations = elevations::list_by_job(&pool.conn, &job.id)?;
            out.push(JobWithElevations {
                job,
                job_elevations,
            });
        }
        Ok(out)
    }

    pub fn get(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<JobWithElevations> {
        session.require_any(&[Role::Admin, Role::Foreman])?;
        let job = fetch(pool, id)?;
        if !job.active && !session.is_admin() {
            return Err(AppError::Forbidden("job template is archived".into()));
        }
        let job_elevations = elevations::list_by_job(&pool.conn, id)?;
        Ok(JobWithElevations {
            job,
            job_elevations,
        })
    }

    pub fn update(
        pool: &mut DbPool,
        session: &Session,
        id: &str,
        update: &JobTemplateUpdate,
    ) -> AppResult<JobTemplate> {
        session.require_admin()?;

        if update.job_name.is_none() && update.active.is_none() {
            return Err(AppError::InvalidInput("nothing to update".into()));
        }
        let cleaned = JobTemplateUpdate {
            job_name: update
                .job_name
                .as_deref()
                .map(|n| super::required(n, "job_name"))
                .transpose()?,
            active: update.active,
        };

        let affected = jobs::update(&pool.conn, id, &cleaned, &now_ts())?;
        super::expect_row(affected, "job template", id)?;

        let what = match cleaned.active {
            Some(false) => "Job template archived",
            Some(true) if cleaned.job_name.is_none() => "Job template reactivated",
            _ => "Job template updated",
        };
        ttlog(&pool.conn, "job_update", id, what)?;

        fetch(pool, id)
    }

    /// Hide from foremen; elevations and logs stay untouched.
    pub fn archive(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<JobTemplate> {
        let update = JobTemplateUpdate {
            active: Some(false),
            ..Default::default()
        };
        Self::update(pool, session, id, &update)
    }

    pub fn reactivate(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<JobTemplate> {
        let update = JobTemplateUpdate {
            active: Some(true),
            ..Default::default()
        };
        Self::update(pool, session, id, &update)
    }

    /// Removes the template together with its elevations and job logs.
    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin()?;

        let affected = jobs::delete(&pool.conn, id)
            .map_err(|e| super::map_delete_error(e, AppError::RecordInUse("job template")))?;
        super::expect_row(affected, "job template", id)?;
        ttlog(&pool.conn, "job_delete", id, "Job template deleted with its elevations and logs")?;
        Ok(())
    }
}

fn fetch(pool: &mut DbPool, id: &str) -> AppResult<JobTemplate> {
    jobs::get(&pool.conn, id)?.ok_or_else(|| AppError::NotFound {
        entity: "job template",
        id: id.to_string(),
    })
}
