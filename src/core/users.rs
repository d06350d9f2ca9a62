use super::auth::AuthLogic;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::now_ts;
use crate::db::pool::DbPool;
use crate::db::queries::profiles;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{AdminProfileUpdate, CreateUserInput, CreateUserOutcome, Profile};
use crate::models::session::Session;

pub struct UserLogic;

impl UserLogic {
    pub fn list(pool: &mut DbPool, session: &Session) -> AppResult<Vec<Profile>> {
        session.require_admin()?;
        Ok(profiles::list_all(&pool.conn)?)
    }

    pub fn get(pool: &mut DbPool, session: &Session, id: &str) -> AppResult<Profile> {
        session.require_admin()?;
        fetch(pool, id)
    }

    /// Two steps: account (with base profile), then profile details.
    ///
    /// A failure in the second step leaves the account in place and is
    /// reported through `CreateUserOutcome::warning`.
    pub fn create(
        pool: &mut DbPool,
        session: &Session,
        cfg: &Config,
        input: &CreateUserInput,
    ) -> AppResult<CreateUserOutcome> {
        session.require_admin()?;

        let first_name = super::required(&input.first_name, "first_name")?;
        let last_name = super::required(&input.last_name, "last_name")?;
        if let Some(rate) = input.hourly_rate {
            super::non_negative(rate, "hourly_rate")?;
        }

        let id = AuthLogic::create_account(pool, &input.email, &input.password, cfg.password_cost)?;
        ttlog(
            &pool.conn,
            "user_create",
            &id,
            &format!("Account created for {}", input.email.trim()),
        )?;

        let update = AdminProfileUpdate {
            first_name: Some(first_name),
            last_name: Some(last_name),
            phone_number: Some(super::optional(input.phone_number.as_deref())),
            role: Some(input.role),
            crew_id: Some(super::optional(input.crew_id.as_deref())),
            hourly_rate: Some(input.hourly_rate),
        };

        let warning = match profiles::update_admin(&pool.conn, &id, &update, &now_ts()) {
            Ok(_) => None,
            Err(e) => {
                let msg = format!("User created but profile update failed: {e}");
                ttlog(&pool.conn, "user_create", &id, &msg)?;
                Some(msg)
            }
        };

        Ok(CreateUserOutcome {
            profile: fetch(pool, &id)?,
            warning,
        })
    }

    pub fn update(
        pool: &mut DbPool,
        session: &Session,
        id: &str,
        update: &AdminProfileUpdate,
    ) -> AppResult<Profile> {
        session.require_admin()?;

        if update.is_empty() {
            return Err(AppError::InvalidInput("nothing to update".into()));
        }
        if let Some(name) = &update.first_name {
            super::required(name, "first_name")?;
        }
        if let Some(name) = &update.last_name {
            super::required(name, "last_name")?;
        }
        if let Some(Some(rate)) = update.hourly_rate {
            super::non_negative(rate, "hourly_rate")?;
        }

        let cleaned = AdminProfileUpdate {
            first_name: update.first_name.as_deref().map(|s| s.trim().to_string()),
            last_name: update.last_name.as_deref().map(|s| s.trim().to_string()),
            phone_number: update
                .phone_number
                .as_ref()
                .map(|p| super::optional(p.as_deref())),
            role: update.role,
            crew_id: update.crew_id.as_ref().map(|c| super::optional(c.as_deref())),
            hourly_rate: update.hourly_rate,
        };

        let affected = profiles::update_admin(&pool.conn, id, &cleaned, &now_ts())
            .map_err(|e| super::map_reference_error(e, "crew"))?;
        super::expect_row(affected, "user", id)?;

        ttlog(&pool.conn, "user_update", id, "Profile updated by admin")?;
        fetch(pool, id)
    }
}

fn fetch(pool: &mut DbPool, id: &str) -> AppResult<Profile> {
    profiles::get(&pool.conn, id)?.ok_or_else(|| AppError::NotFound {
        entity: "user",
        id: id.to_string(),
    })
}
