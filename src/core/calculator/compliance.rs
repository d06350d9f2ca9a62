//! Weekly crew compliance: does the job revenue a crew produced in a week
//! cover the hourly minimum owed to the workers who logged hours?

use crate::db::pool::DbPool;
use crate::db::queries::{hours, job_logs, legacy_jobs, profiles};
use crate::errors::{AppError, AppResult};
use crate::models::compliance::{CrewMember, WeeklyCrewSummary, WorkedHours, WorkerSummary};
use crate::models::profile::full_name_or_unknown;
use crate::models::session::Session;
use crate::utils::date::parse_date_arg;
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use std::collections::HashMap;

/// Where the crew's revenue for the week comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RevenueSource {
    /// Flat legacy job rows.
    #[default]
    Legacy,
    /// Job logs priced through their elevation.
    Logs,
}

pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Days::new(6)
}

/// Pure aggregation over already-fetched rows.
///
/// Workers without hours are left out; the rest keep the order in which
/// they first appear in `hours`.
pub fn compute_weekly_summary(
    week_start: NaiveDate,
    members: &[CrewMember],
    hours: &[WorkedHours],
    revenue: &[f64],
) -> WeeklyCrewSummary {
    // folding from +0.0 keeps empty weeks at 0.0 rather than -0.0
    let total_job_earnings = revenue.iter().fold(0.0, |acc, r| acc + r);

    let by_id: HashMap<&str, &CrewMember> = members.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut workers: Vec<WorkerSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in hours {
        let Some(member) = by_id.get(row.worker_id.as_str()) else {
            continue;
        };

        let idx = *index.entry(member.id.as_str()).or_insert_with(|| {
            workers.push(WorkerSummary {
                worker_id: member.id.clone(),
                full_name: full_name_or_unknown(&member.first_name, &member.last_name),
                hourly_rate: member.hourly_rate.unwrap_or(0.0),
                total_hours: 0.0,
                minimum_required_pay: 0.0,
            });
            workers.len() - 1
        });

        workers[idx].total_hours += row.hours_worked;
    }

    for w in &mut workers {
        w.minimum_required_pay = w.total_hours * w.hourly_rate;
    }

    let total_minimum_required = workers
        .iter()
        .fold(0.0, |acc, w| acc + w.minimum_required_pay);

    WeeklyCrewSummary {
        week_start,
        week_end: week_end(week_start),
        total_job_earnings,
        total_minimum_required,
        bonus_pool: total_job_earnings - total_minimum_required,
        is_compliant: total_job_earnings >= total_minimum_required,
        workers,
    }
}

/// Admin report for one crew and the 7 days starting at `week_start`.
pub fn weekly_crew_summary(
    pool: &mut DbPool,
    session: &Session,
    crew_id: &str,
    week_start: &str,
    source: RevenueSource,
) -> AppResult<WeeklyCrewSummary> {
    session.require_admin()?;

    let crew_id = crew_id.trim();
    if crew_id.is_empty() {
        return Err(AppError::MissingField("crew_id"));
    }
    let start = parse_date_arg(week_start)?;
    let end = week_end(start);

    let members = profiles::list_crew_members(&pool.conn, crew_id)?;
    let ids: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
    let worked = hours::list_for_workers(&pool.conn, &ids, &start, &end)?;

    let revenue = match source {
        RevenueSource::Legacy => legacy_jobs::revenue_for_crew(&pool.conn, crew_id, &start, &end)?,
        RevenueSource::Logs => job_logs::revenue_for_crew(&pool.conn, crew_id, &start, &end)?,
    };

    Ok(compute_weekly_summary(start, &members, &worked, &revenue))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, first: &str, last: &str, rate: Option<f64>) -> CrewMember {
        CrewMember {
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            hourly_rate: rate,
        }
    }

    fn worked(id: &str, h: f64) -> WorkedHours {
        WorkedHours {
            worker_id: id.into(),
            hours_worked: h,
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    #[test]
    fn crew_covering_minimum_is_compliant() {
        let members = vec![member("w1", "Ana", "Lopez", Some(20.0))];
        let hours = vec![worked("w1", 8.0), worked("w1", 8.0)];

        let s = compute_weekly_summary(monday(), &members, &hours, &[500.0]);

        assert_eq!(s.week_end, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
        assert_eq!(s.workers.len(), 1);
        assert_eq!(s.workers[0].full_name, "Ana Lopez");
        assert_eq!(s.workers[0].total_hours, 16.0);
        assert_eq!(s.workers[0].minimum_required_pay, 320.0);
        assert_eq!(s.total_minimum_required, 320.0);
        assert_eq!(s.bonus_pool, 180.0);
        assert!(s.is_compliant);
    }

    #[test]
    fn shortfall_gives_negative_pool() {
        let members = vec![
            member("w1", "Ana", "Lopez", Some(25.0)),
            member("w2", "Ben", "Ortiz", Some(20.0)),
        ];
        let hours = vec![worked("w2", 10.0), worked("w1", 10.0)];

        let s = compute_weekly_summary(monday(), &members, &hours, &[200.0, 100.0]);

        assert_eq!(s.total_job_earnings, 300.0);
        assert_eq!(s.total_minimum_required, 450.0);
        assert_eq!(s.bonus_pool, -150.0);
        assert!(!s.is_compliant);
        // first appearance order
        assert_eq!(s.workers[0].worker_id, "w2");
        assert_eq!(s.workers[1].worker_id, "w1");
    }

    #[test]
    fn missing_rate_and_names_fall_back() {
        let members = vec![member("w1", "", "Lopez", None)];
        let s = compute_weekly_summary(monday(), &members, &[worked("w1", 6.0)], &[]);

        assert_eq!(s.workers[0].full_name, "Unknown");
        assert_eq!(s.workers[0].hourly_rate, 0.0);
        assert_eq!(s.workers[0].minimum_required_pay, 0.0);
        assert!(s.is_compliant);
    }

    #[test]
    fn members_without_hours_are_omitted() {
        let members = vec![
            member("w1", "Ana", "Lopez", Some(20.0)),
            member("w2", "Ben", "Ortiz", Some(20.0)),
        ];
        let s = compute_weekly_summary(monday(), &members, &[worked("w2", 4.0)], &[]);
        assert_eq!(s.workers.len(), 1);
        assert_eq!(s.workers[0].worker_id, "w2");
    }

    #[test]
    fn empty_crew_is_trivially_compliant() {
        let s = compute_weekly_summary(monday(), &[], &[], &[]);
        assert!(s.workers.is_empty());
        assert_eq!(s.total_job_earnings, 0.0);
        assert_eq!(s.bonus_pool, 0.0);
        assert!(s.total_job_earnings.is_sign_positive());
        assert!(s.total_minimum_required.is_sign_positive());
        assert!(s.bonus_pool.is_sign_positive());
        assert!(s.is_compliant);

        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("-0.0"));
    }
}
