use chrono::NaiveDate;
use serde::Serialize;

/// Flat job record from before job templates existed.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyJob {
    pub id: String,
    pub date: NaiveDate,
    pub job_name: String,
    pub elevation: Option<String>,
    pub lot_address: Option<String>,
    pub yardage: f64,
    pub rate: f64,
    pub total: f64,
    pub crew_id: String,
    pub crew_name: Option<String>,
    pub created_by: String,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct LegacyJobInput {
    pub job_name: String,
    pub elevation: Option<String>,
    pub lot_address: Option<String>,
    pub yardage: f64,
    pub rate: f64,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
}
