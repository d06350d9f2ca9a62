use crate::models::hours::{Hours, HoursWithWorker};
use crate::models::job_log::{JobLog, JobLogGroup};
use crate::models::legacy_job::LegacyJob;
use crate::models::stats::{HoursStats, JobStats};

pub fn job_log_stats(logs: &[JobLog]) -> JobStats {
    JobStats {
        total_jobs: logs.len(),
        total_yardage: logs.iter().map(|l| l.yardage).sum(),
        total_revenue: logs.iter().map(|l| l.total).sum(),
    }
}

pub fn legacy_job_stats(jobs: &[LegacyJob]) -> JobStats {
    JobStats {
        total_jobs: jobs.len(),
        total_yardage: jobs.iter().map(|j| j.yardage).sum(),
        total_revenue: jobs.iter().map(|j| j.total).sum(),
    }
}

/// Totals for one worker's own entries at their rate.
pub fn own_hours_stats(entries: &[Hours], hourly_rate: Option<f64>) -> HoursStats {
    let total_hours: f64 = entries.iter().map(|h| h.hours_worked).sum();
    HoursStats {
        entries: entries.len(),
        total_hours,
        total_pay: total_hours * hourly_rate.unwrap_or(0.0),
    }
}

pub fn hours_stats(entries: &[HoursWithWorker]) -> HoursStats {
    HoursStats {
        entries: entries.len(),
        total_hours: entries.iter().map(|h| h.hours.hours_worked).sum(),
        total_pay: entries.iter().map(HoursWithWorker::pay).sum(),
    }
}

/// Group logs by job, keeping the first-seen order of jobs.
pub fn group_by_job(logs: Vec<JobLog>) -> Vec<JobLogGroup> {
    let mut groups: Vec<JobLogGroup> = Vec::new();

    for log in logs {
        let idx = match groups.iter().position(|g| g.job_id == log.job_id) {
            Some(i) => i,
            None => {
                groups.push(JobLogGroup {
                    job_id: log.job_id.clone(),
                    job_name: log.job_name.clone(),
                    logs: Vec::new(),
                    total_yardage: 0.0,
                    total_revenue: 0.0,
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        group.total_yardage += log.yardage;
        group.total_revenue += log.total;
        group.logs.push(log);
    }

    groups
}
