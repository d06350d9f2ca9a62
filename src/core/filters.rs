//! Case-insensitive text search over listings.

use crate::models::hours::HoursWithWorker;
use crate::models::job_log::JobLog;

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Job name, lot, elevation, crew, creator and notes.
pub fn job_log_matches(log: &JobLog, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    let creator = log.creator_name();
    [
        Some(log.job_name.as_str()),
        log.lot.as_deref(),
        Some(log.elevation_name.as_str()),
        Some(log.crew_name.as_str()),
        Some(creator.as_str()),
        log.notes.as_deref(),
    ]
    .into_iter()
    .any(|f| contains(f, &q))
}

/// Worker name, email, crew and notes.
pub fn hours_matches(entry: &HoursWithWorker, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    let name = entry.worker_name();
    [
        Some(name.as_str()),
        Some(entry.email.as_str()),
        entry.crew_name.as_deref(),
        entry.hours.notes.as_deref(),
    ]
    .into_iter()
    .any(|f| contains(f, &q))
}

pub fn search_job_logs(logs: Vec<JobLog>, query: Option<&str>) -> Vec<JobLog> {
    match query {
        Some(q) => logs.into_iter().filter(|l| job_log_matches(l, q)).collect(),
        None => logs,
    }
}

pub fn search_hours(entries: Vec<HoursWithWorker>, query: Option<&str>) -> Vec<HoursWithWorker> {
    match query {
        Some(q) => entries.into_iter().filter(|h| hours_matches(h, q)).collect(),
        None => entries,
    }
}
