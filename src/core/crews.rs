use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::crews;
use crate::db::{new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::crew::{Crew, CrewInput};
use crate::models::session::Session;

pub struct CrewLogic;

fn clean(input: &CrewInput) -> AppResult<CrewInput> {
    Ok(CrewInput {
        name: super::required(&input.name, "name")?,
        trade_id: super::optional(input.trade_id.as_deref()),
    })
}

impl CrewLogic {
    pub fn list(pool: &mut DbPool, session: &Session) -> AppResult<Vec<Crew>> {
        session.require_admin()?;
        Ok(crews::list_all(&pool.conn)?)
    }

    pub fn get(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<Crew> {
        session.require_admin()?;
        fetch(pool, id)
    }

    pub fn create(pool: &mut DbPool, session: &Session, input: &CrewInput) -> AppResult<Crew> {
        session.require_admin()?;
        let input = clean(input)?;
        let id = new_id();

        crews::insert(&pool.conn, &id, &input, &now_ts())
            .map_err(|e| super::map_reference_error(e, "trade"))?;
        ttlog(&pool.conn, "crew_create", &id, &format!("Crew '{}' created", input.name))?;

        fetch(pool, &id)
    }

    pub fn update(pool: &mut DbPool, session: &Session, id: &str, input: &CrewInput) -> AppResult<Crew> {
        session.require_admin()?;
        let input = clean(input)?;

        let affected = crews::update(&pool.conn, id, &input, &now_ts())
            .map_err(|e| super::map_reference_error(e, "trade"))?;
        super::expect_row(affected, "crew", id)?;
        ttlog(&pool.conn, "crew_update", id, &format!("Crew renamed to '{}'", input.name))?;

        fetch(pool, id)
    }

    /// Members are detached; crews with logged work cannot be removed.
    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin()?;

        let affected = crews::delete(&pool.conn, id)
            .map_err(|e| super::map_delete_error(e, AppError::RecordInUse("crew")))?;
        super::expect_row(affected, "crew", id)?;
        ttlog(&pool.conn, "crew_delete", id, "Crew deleted")?;
        Ok(())
    }
}

fn fetch(pool: &mut DbPool, id: &str) -> AppResult<Crew> {
    crews::get(&pool.conn, id)?.ok_or_else(|| AppError::NotFound {
        entity: "crew",
        id: id.to_string(),
    })
}
