use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::trades;
use crate::db::{new_id, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use crate::models::trade::{Trade, TradeInput};

pub struct TradeLogic;

fn clean(input: &TradeInput) -> AppResult<TradeInput> {
    Ok(TradeInput {
        trade_name: super::required(&input.trade_name, "trade_name")?,
        department_id: super::optional(input.department_id.as_deref()),
        description: super::optional(input.description.as_deref()),
    })
}

impl TradeLogic {
    pub fn list(pool: &mut DbPool, session: &Session) -> AppResult<Vec<Trade>> {
        session.require_admin()?;
        Ok(trades::list_all(&pool.conn)?)
    }

    pub fn get(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<Trade> {
        session.require_admin()?;
        fetch(pool, id)
    }

    pub fn create(pool: &mut DbPool, session: &Session, input: &TradeInput) -> AppResult<Trade> {
        session.require_admin()?;
        let input = clean(input)?;
        let id = new_id();

        trades::insert(&pool.conn, &id, &input, &now_ts())?;
        ttlog(
            &pool.conn,
            "trade_create",
            &id,
            &format!("Trade '{}' created", input.trade_name),
        )?;

        fetch(pool, &id)
    }

    pub fn update(pool: &mut DbPool, session: &Session, id: &str, input: &TradeInput) -> AppResult<Trade> {
        session.require_admin()?;
        let input = clean(input)?;

        let affected = trades::update(&pool.conn, id, &input, &now_ts())?;
        super::expect_row(affected, "trade", id)?;
        ttlog(&pool.conn, "trade_update", id, "Trade updated")?;

        fetch(pool, id)
    }

    /// Rejected with `TradeInUse` while any crew points at the trade.
    pub fn delete(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin()?;

        let affected = trades::delete(&pool.conn, id)
            .map_err(|e| super::map_delete_error(e, AppError::TradeInUse))?;
        super::expect_row(affected, "trade", id)?;
        ttlog(&pool.conn, "trade_delete", id, "Trade deleted")?;
        Ok(())
    }
}

fn fetch(pool: &mut DbPool, id: &str) -> AppResult<Trade> {
    trades::get(&pool.conn, id)?.ok_or_else(|| AppError::NotFound {
        entity: "trade",
        id: id.to_string(),
    })
}
