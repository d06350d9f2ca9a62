use super::profile::Profile;
use super::role::Role;
use crate::errors::{AppError, AppResult};

/// Authenticated user context for one command.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub profile: Profile,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.profile.id
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }

    pub fn is_admin(&self) -> bool {
        self.profile.role == Role::Admin
    }

    pub fn require_admin(&self) -> AppResult<()> {
        self.require_any(&[Role::Admin])
    }

    pub fn require_any(&self, roles: &[Role]) -> AppResult<()> {
        if roles.contains(&self.profile.role) {
            return Ok(());
        }
        let names: Vec<&str> = roles.iter().map(|r| r.to_db_str()).collect();
        Err(AppError::Forbidden(format!(
            "requires role {} (you are {})",
            names.join(" or "),
            self.profile.role.to_db_str()
        )))
    }

    /// Crew of the current user, required for crew-scoped actions.
    pub fn crew_id(&self) -> AppResult<&str> {
        self.profile
            .crew_id
            .as_deref()
            .ok_or(AppError::NoCrewAssigned)
    }
}
