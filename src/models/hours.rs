use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Hours {
    pub id: String,
    pub worker_id: String,
    pub date_worked: NaiveDate,
    pub hours_worked: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Hours row joined with the submitting worker (admin listing).
#[derive(Debug, Clone, Serialize)]
pub struct HoursWithWorker {
    #[serde(flatten)]
    pub hours: Hours,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hourly_rate: Option<f64>,
    pub crew_id: Option<String>,
    pub crew_name: Option<String>,
}

impl HoursWithWorker {
    pub fn worker_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn pay(&self) -> f64 {
        self.hours.hours_worked * self.hourly_rate.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct HoursInput {
    pub date_worked: NaiveDate,
    pub hours_worked: f64,
    pub notes: Option<String>,
}
