use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub worker_id: String,
    pub full_name: String,
    pub hourly_rate: f64,
    pub total_hours: f64,
    pub minimum_required_pay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCrewSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_job_earnings: f64,
    pub total_minimum_required: f64,
    pub bonus_pool: f64,
    pub is_compliant: bool,
    pub workers: Vec<WorkerSummary>,
}

/// Crew member as fetched for the weekly calculation.
#[derive(Debug, Clone)]
pub struct CrewMember {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub hourly_rate: Option<f64>,
}

/// One hours row inside the week.
#[derive(Debug, Clone)]
pub struct WorkedHours {
    pub worker_id: String,
    pub hours_worked: f64,
}
