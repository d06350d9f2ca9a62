// src/export/model.rs

use crate::models::compliance::{WeeklyCrewSummary, WorkerSummary};
use crate::models::hours::HoursWithWorker;
use crate::models::job_log::JobLog;
use serde::Serialize;

/// Flat job log row, one line per log in CSV.
#[derive(Debug, Serialize)]
pub struct JobLogExport {
    pub id: String,
    pub date_worked: String,
    pub job_name: String,
    pub elevation_name: String,
    pub lot: String,
    pub crew_name: String,
    pub trade_name: String,
    pub yardage: f64,
    pub rate: f64,
    pub total: f64,
    pub created_by: String,
    pub notes: String,
}

impl From<&JobLog> for JobLogExport {
    fn from(l: &JobLog) -> Self {
        Self {
            id: l.id.clone(),
            date_worked: l.date_worked.to_string(),
            job_name: l.job_name.clone(),
            elevation_name: l.elevation_name.clone(),
            lot: l.lot.clone().unwrap_or_default(),
            crew_name: l.crew_name.clone(),
            trade_name: l.trade_name.clone().unwrap_or_default(),
            yardage: l.yardage,
            rate: l.rate,
            total: l.total,
            created_by: l.creator_name(),
            notes: l.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HoursExport {
    pub id: String,
    pub date_worked: String,
    pub worker: String,
    pub email: String,
    pub crew_name: String,
    pub hours_worked: f64,
    pub hourly_rate: f64,
    pub pay: f64,
    pub notes: String,
}

impl From<&HoursWithWorker> for HoursExport {
    fn from(h: &HoursWithWorker) -> Self {
        Self {
            id: h.hours.id.clone(),
            date_worked: h.hours.date_worked.to_string(),
            worker: h.worker_name(),
            email: h.email.clone(),
            crew_name: h.crew_name.clone().unwrap_or_default(),
            hours_worked: h.hours.hours_worked,
            hourly_rate: h.hourly_rate.unwrap_or(0.0),
            pay: h.pay(),
            notes: h.hours.notes.clone().unwrap_or_default(),
        }
    }
}

/// Weekly report flattened to one CSV line per worker, carrying the crew
/// totals on every line. A week without hours still gets one totals line
/// with the worker columns left blank.
#[derive(Debug, Serialize)]
pub struct WeeklyWorkerExport {
    pub week_start: String,
    pub week_end: String,
    pub worker_id: String,
    pub full_name: String,
    pub hourly_rate: Option<f64>,
    pub total_hours: Option<f64>,
    pub minimum_required_pay: Option<f64>,
    pub total_job_earnings: f64,
    pub total_minimum_required: f64,
    pub bonus_pool: f64,
    pub is_compliant: bool,
}

impl WeeklyWorkerExport {
    fn totals(summary: &WeeklyCrewSummary, worker: Option<&WorkerSummary>) -> Self {
        Self {
            week_start: summary.week_start.to_string(),
            week_end: summary.week_end.to_string(),
            worker_id: worker.map(|w| w.worker_id.clone()).unwrap_or_default(),
            full_name: worker.map(|w| w.full_name.clone()).unwrap_or_default(),
            hourly_rate: worker.map(|w| w.hourly_rate),
            total_hours: worker.map(|w| w.total_hours),
            minimum_required_pay: worker.map(|w| w.minimum_required_pay),
            total_job_earnings: summary.total_job_earnings,
            total_minimum_required: summary.total_minimum_required,
            bonus_pool: summary.bonus_pool,
            is_compliant: summary.is_compliant,
        }
    }

    pub fn rows(summary: &WeeklyCrewSummary) -> Vec<Self> {
        if summary.workers.is_empty() {
            return vec![Self::totals(summary, None)];
        }
        summary
            .workers
            .iter()
            .map(|w| Self::totals(summary, Some(w)))
            .collect()
    }
}
