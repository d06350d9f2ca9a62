use crate::db::log::ttlog;
use crate::db::now_ts;
use crate::db::pool::DbPool;
use crate::db::queries::profiles;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{Profile, ProfileUpdate};
use crate::models::session::Session;

pub struct ProfileLogic;

impl ProfileLogic {
    /// Own profile, freshly read (crew name included).
    pub fn show(pool: &mut DbPool, session: &Session) -> AppResult<Profile> {
        profiles::get(&pool.conn, session.user_id())?.ok_or_else(|| AppError::NotFound {
            entity: "profile",
            id: session.user_id().to_string(),
        })
    }

    /// Names are trimmed and must stay non-empty. A phone of `Some("")`
    /// clears the number, `None` keeps the current one.
    pub fn update(pool: &mut DbPool, session: &Session, update: &ProfileUpdate) -> AppResult<Profile> {
        let current = Self::show(pool, session)?;

        let first_name = update
            .first_name
            .as_deref()
            .map(|n| super::required(n, "first_name"))
            .transpose()?;
        let last_name = update
            .last_name
            .as_deref()
            .map(|n| super::required(n, "last_name"))
            .transpose()?;
        let phone_number = match &update.phone_number {
            Some(p) => super::optional(Some(p.as_str())),
            None => current.phone_number.clone(),
        };

        let cleaned = ProfileUpdate {
            first_name,
            last_name,
            phone_number,
        };
        profiles::update_self(&pool.conn, session.user_id(), &cleaned, &now_ts())?;
        ttlog(&pool.conn, "profile_update", session.user_id(), "Own profile updated")?;

        Self::show(pool, session)
    }
}
