use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{elevations, jobs};
use crate::db::{new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::job::{ElevationInput, ElevationUpdate, JobElevation};
use crate::models::role::Role;
use crate::models::session::Session;

pub struct ElevationLogic;

impl ElevationLogic {
    /// `total` is left to the store (yardage × rate).
    pub fn add(pool: &mut DbPool, session: &Session, input: &ElevationInput) -> AppResult<JobElevation> {
        session.require_admin()?;

        let job_id = super::required(&input.job_id, "job_id")?;
        let input = ElevationInput {
            elevation_name: super::required(&input.elevation_name, "elevation_name")?,
            yardage: super::non_negative(input.yardage, "yardage")?,
            rate: super::non_negative(input.rate, "rate")?,
            job_id,
        };
        if jobs::get(&pool.conn, &input.job_id)?.is_none() {
            return Err(AppError::NotFound {
                entity: "job template",
                id: input.job_id,
            });
        }

        let id = new_id();
        elevations::insert(&pool.conn, &id, &input, &now_ts())?;
        ttlog(
            &pool.conn,
            "elevation_create",
            &id,
            &format!("Elevation '{}' added to job {}", input.elevation_name, input.job_id),
        )?;

        fetch(pool, &id)
    }

    pub fn list(pool: &mut DbPool, session: &Session, job_id: &str) -> AppResult<Vec<JobElevation>> {
        session.require_any(&[Role::Admin, Role::Foreman])?;
        Ok(elevations::list_by_job(&pool.conn, job_id)?)
    }

    pub fn get(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<JobElevation> {
        session.require_any(&[Role::Admin, Role::Foreman])?;
        fetch(pool, id)
    }

    pub fn update(
        pool: &mut DbPool,
        session: &Session,
        id: &str,
        update: &ElevationUpdate,
    ) -> AppResult<JobElevation> {
        session.require_admin()?;

        if update.elevation_name.is_none() && update.yardage.is_none() && update.rate.is_none() {
            return Err(AppError::InvalidInput("nothing to update".into()));
        }
        let cleaned = ElevationUpdate {
            elevation_name: update
                .elevation_name
                .as_deref()
                .map(|n| super::required(n, "elevation_name"))
                .transpose()?,
            yardage: update
                .yardage
                .map(|v| super::non_negative(v, "yardage"))
                .transpose()?,
            rate: update
                .rate
                .map(|v| super::non_negative(v, "rate"))
                .transpose()?,
        };

        let affected = elevations::update(&pool.conn, id, &cleaned, &now_ts())?;
        super::expect_row(affected, "elevation", id)?;
        ttlog(&pool.conn, "elevation_update", id, "Elevation updated")?;

        fetch(pool, id)
    }

    /// Elevations referenced by job logs cannot be removed.
    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin()?;

        let affected = elevations::delete(&pool.conn, id)
            .map_err(|e| super::map_delete_error(e, AppError::RecordInUse("elevation")))?;
        super::expect_row(affected, "elevation", id)?;
        ttlog(&pool.conn, "elevation_delete", id, "Elevation deleted")?;
        Ok(())
    }
}

fn fetch(pool: &mut DbPool, id: &str) -> AppResult<JobElevation> {
    elevations::get(&pool.conn, id)?.ok_or_else(|| AppError::NotFound {
        entity: "elevation",
        id: id.to_string(),
    })
}
