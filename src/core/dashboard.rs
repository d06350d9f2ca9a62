use super::calculator::stats;
use crate::db::pool::DbPool;
use crate::db::queries::hours;
use crate::db::queries::job_logs::{self, JobLogFilter};
use crate::errors::AppResult;
use crate::models::job_log::JobLog;
use crate::models::profile::Profile;
use crate::models::role::Role;
use crate::models::session::Session;
use crate::models::stats::{HoursStats, JobStats};
use crate::utils::date::{DateRange, Preset, preset_range};
use chrono::NaiveDate;

/// Landing view, one shape per role.
#[derive(Debug, Clone)]
pub enum Dashboard {
    Admin {
        profile: Profile,
        all_time: JobStats,
    },
    Foreman {
        profile: Profile,
        week: DateRange,
        crew_week: Option<JobStats>,
        recent: Vec<JobLog>,
    },
    Worker {
        profile: Profile,
        week: DateRange,
        week_hours: HoursStats,
    },
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn build(pool: &mut DbPool, session: &Session, today: NaiveDate, recent_limit: usize) -> AppResult<Dashboard> {
        let profile = session.profile.clone();
        let week = preset_range(Preset::ThisWeek, today);

        match session.role() {
            Role::Admin => {
                let logs = job_logs::list(&pool.conn, &JobLogFilter::default())?;
                Ok(Dashboard::Admin {
                    profile,
                    all_time: stats::job_log_stats(&logs),
                })
            }
            Role::Foreman => {
                // Without a crew there is nothing to summarise yet.
                let Some(crew_id) = profile.crew_id.clone() else {
                    return Ok(Dashboard::Foreman {
                        profile,
                        week,
                        crew_week: None,
                        recent: Vec::new(),
                    });
                };

                let week_filter = JobLogFilter {
                    crew_id: Some(crew_id.clone()),
                    from: week.from,
                    to: week.to,
                    ..Default::default()
                };
                let week_logs = job_logs::list(&pool.conn, &week_filter)?;

                let all_filter = JobLogFilter {
                    crew_id: Some(crew_id),
                    ..Default::default()
                };
                let mut recent = job_logs::list(&pool.conn, &all_filter)?;
                recent.truncate(recent_limit);

                Ok(Dashboard::Foreman {
                    profile,
                    week,
                    crew_week: Some(stats::job_log_stats(&week_logs)),
                    recent,
                })
            }
            Role::Worker => {
                let entries = hours::list_by_worker(&pool.conn, &profile.id, week.from, week.to)?;
                let week_hours = stats::own_hours_stats(&entries, profile.hourly_rate);
                Ok(Dashboard::Worker {
                    profile,
                    week,
                    week_hours,
                })
            }
        }
    }
}
