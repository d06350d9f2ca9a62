use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{auth, profiles};
use crate::db::{self, new_id, now_ts, ts};
use crate::errors::{AppError, AppResult};
use crate::models::profile::{AdminProfileUpdate, Profile};
use crate::models::role::Role;
use crate::models::session::Session;
use chrono::{Duration, Utc};
use std::fs;
use std::path::Path;

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthLogic;

impl AuthLogic {
    pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(bcrypt::hash(password, cost)?)
    }

    /// Create the account and its base profile (role `worker`, empty names).
    pub fn create_account(
        pool: &mut DbPool,
        email: &str,
        password: &str,
        cost: u32,
    ) -> AppResult<String> {
        let email = super::required(email, "email")?.to_lowercase();
        let hash = Self::hash_password(password, cost)?;
        let id = new_id();
        let now = now_ts();

        auth::insert_user(&pool.conn, &id, &email, &hash, &now).map_err(|e| {
            if db::is_unique_violation(&e) {
                AppError::EmailTaken(email.clone())
            } else {
                AppError::Db(e)
            }
        })?;
        profiles::insert_base(&pool.conn, &id, &email, &now)?;

        Ok(id)
    }

    /// First admin of an empty database.
    pub fn bootstrap_admin(
        pool: &mut DbPool,
        cfg: &Config,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Profile> {
        if auth::count_users(&pool.conn)? > 0 {
            return Err(AppError::Forbidden(
                "an administrator already exists; ask them to create your account".into(),
            ));
        }

        let first_name = super::required(first_name, "first_name")?;
        let last_name = super::required(last_name, "last_name")?;
        let id = Self::create_account(pool, email, password, cfg.password_cost)?;

        let update = AdminProfileUpdate {
            first_name: Some(first_name),
            last_name: Some(last_name),
            role: Some(Role::Admin),
            ..Default::default()
        };
        profiles::update_admin(&pool.conn, &id, &update, &now_ts())?;
        ttlog(&pool.conn, "init", &id, "Administrator account created")?;

        profiles::get(&pool.conn, &id)?.ok_or(AppError::NotFound {
            entity: "profile",
            id,
        })
    }

    /// Verify credentials and open a session valid for `session_ttl_hours`.
    pub fn login(pool: &mut DbPool, cfg: &Config, email: &str, password: &str) -> AppResult<Session> {
        let email = super::required(email, "email")?;
        let user = auth::find_by_email(&pool.conn, &email)?.ok_or(AppError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password_hash)? {
            ttlog(&pool.conn, "login_failed", &email, "Wrong password")?;
            return Err(AppError::InvalidCredentials);
        }

        let now = Utc::now();
        auth::purge_expired_sessions(&pool.conn, &ts(now))?;

        let token = new_id();
        let expires = Duration::try_hours(cfg.session_ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "session_ttl_hours must be a positive number of hours, got {}",
                    cfg.session_ttl_hours
                ))
            })?;
        auth::insert_session(
            &pool.conn,
            &token,
            &user.id,
            &ts(now),
            &ts(expires),
        )?;
        ttlog(&pool.conn, "login", &user.id, &format!("Session opened for {email}"))?;

        Self::resolve(pool, &token)
    }

    /// Load the session behind `token`; expired or unknown tokens are rejected.
    pub fn resolve(pool: &mut DbPool, token: &str) -> AppResult<Session> {
        let user_id = auth::session_user(&pool.conn, token.trim(), &now_ts())?
            .ok_or(AppError::NotAuthenticated)?;
        let profile = profiles::get(&pool.conn, &user_id)?.ok_or(AppError::NotAuthenticated)?;
        Ok(Session {
            token: token.trim().to_string(),
            profile,
        })
    }

    pub fn logout(pool: &mut DbPool, session: &Session) -> AppResult<()> {
        auth::delete_session(&pool.conn, &session.token)?;
        ttlog(&pool.conn, "logout", session.user_id(), "Session closed")?;
        Ok(())
    }

    // ------------------------------------------------
    // Token file handling (`<db>.session`)
    // ------------------------------------------------

    pub fn save_token(path: &Path, token: &str) -> AppResult<()> {
        fs::write(path, token)?;
        Ok(())
    }

    pub fn read_token(path: &Path) -> AppResult<String> {
        match fs::read_to_string(path) {
            Ok(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
            Ok(_) => Err(AppError::NotAuthenticated),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotAuthenticated),
            Err(e) => Err(e.into()),
        }
    }

    pub fn clear_token(path: &Path) -> AppResult<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Session of the current CLI user, from the token file next to the DB.
    pub fn current(pool: &mut DbPool, cfg: &Config) -> AppResult<Session> {
        let token = Self::read_token(&cfg.session_file())?;
        Self::resolve(pool, &token)
    }
}
