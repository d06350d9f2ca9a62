use super::role::Role;
use serde::Serialize;

/// ⇔ one row of `profiles`, joined with the crew name when available.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub crew_id: Option<String>,
    pub crew_name: Option<String>,
    pub hourly_rate: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// "First Last", or "Unknown" when either part is missing.
    pub fn full_name(&self) -> String {
        full_name_or_unknown(&self.first_name, &self.last_name)
    }
}

pub fn full_name_or_unknown(first: &str, last: &str) -> String {
    let (first, last) = (first.trim(), last.trim());
    if first.is_empty() || last.is_empty() {
        "Unknown".to_string()
    } else {
        format!("{first} {last}")
    }
}

/// Self-service edit: only names and phone number.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Admin edit. `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct AdminProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub role: Option<Role>,
    pub crew_id: Option<Option<String>>,
    pub hourly_rate: Option<Option<f64>>,
}

impl AdminProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.role.is_none()
            && self.crew_id.is_none()
            && self.hourly_rate.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub crew_id: Option<String>,
    pub hourly_rate: Option<f64>,
}

/// Result of the two-step user creation; `warning` is set when the account
/// exists but the profile details could not be applied.
#[derive(Debug, Clone)]
pub struct CreateUserOutcome {
    pub profile: Profile,
    pub warning: Option<String>,
}
