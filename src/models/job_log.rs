use chrono::NaiveDate;
use serde::Serialize;

/// A foreman's record of completed work, flattened with its joined data.
#[derive(Debug, Clone, Serialize)]
pub struct JobLog {
    pub id: String,
    pub job_id: String,
    pub elevation_id: String,
    pub crew_id: String,
    pub created_by: String,
    pub lot: Option<String>,
    pub date_worked: NaiveDate,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,

    pub job_name: String,
    pub job_active: bool,
    pub elevation_name: String,
    pub yardage: f64,
    pub rate: f64,
    pub total: f64,
    pub crew_name: String,
    pub trade_name: Option<String>,
    pub creator_first_name: String,
    pub creator_last_name: String,
    pub creator_email: String,
}

impl JobLog {
    pub fn creator_name(&self) -> String {
        format!("{} {}", self.creator_first_name, self.creator_last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct JobLogInput {
    pub job_id: String,
    pub elevation_id: String,
    pub lot: String,
    pub date_worked: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Logs of one job template with their running totals.
#[derive(Debug, Clone, Serialize)]
pub struct JobLogGroup {
    pub job_id: String,
    pub job_name: String,
    pub logs: Vec<JobLog>,
    pub total_yardage: f64,
    pub total_revenue: f64,
}
