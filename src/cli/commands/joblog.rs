use crate::cli::parser::{Commands, JobLogAction};
use crate::config::Config;
use crate::core::calculator::stats::job_log_stats;
use crate::core::filters::search_job_logs;
use crate::core::job_logs::JobLogLogic;
use crate::errors::AppResult;
use crate::models::job_log::{JobLog, JobLogInput};
use crate::models::stats::JobStats;
use crate::ui::messages::{header, success};
use crate::utils::formatting::{format_number, or_dash};
use crate::utils::table::Table;

use super::{authenticate, money, parse_opt_date, print_table, resolve_filters};

fn log_table(logs: &[JobLog], cfg: &Config) -> Table {
    let mut t = Table::new([
        "ID", "Date", "Job", "Elevation", "Lot", "Crew", "Yardage", "Total", "By",
    ]);
    for l in logs {
        t.add_row(vec![
            l.id.clone(),
            l.date_worked.to_string(),
            l.job_name.clone(),
            l.elevation_name.clone(),
            or_dash(l.lot.as_deref()),
            l.crew_name.clone(),
            format_number(l.yardage),
            money(cfg, l.total),
            l.creator_name(),
        ]);
    }
    t
}

pub(crate) fn print_stats(stats: &JobStats, cfg: &Config) {
    println!(
        "Jobs: {}   Yardage: {}   Revenue: {}",
        stats.total_jobs,
        format_number(stats.total_yardage),
        money(cfg, stats.total_revenue)
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::JobLog { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        JobLogAction::Add {
            job,
            elevation,
            lot,
            date,
            notes,
        } => {
            let input = JobLogInput {
                job_id: job.clone(),
                elevation_id: elevation.clone(),
                lot: lot.clone(),
                date_worked: parse_opt_date(date.as_deref())?,
                notes: notes.clone(),
            };
            let log = JobLogLogic::create(&mut pool, &session, &input)?;
            success(format!(
                "Job log recorded: {} / {} lot {} on {} ({}) [{}]",
                log.job_name,
                log.elevation_name,
                or_dash(log.lot.as_deref()),
                log.date_worked,
                money(cfg, log.total),
                log.id
            ));
        }
        JobLogAction::List {
            crew,
            job,
            filters,
            search,
            grouped,
        } => {
            let range = resolve_filters(filters)?;

            if *grouped {
                let groups = JobLogLogic::grouped_by_job(&mut pool, &session, &range)?;
                if groups.is_empty() {
                    crate::ui::messages::info("No job logs found.");
                }
                for g in &groups {
                    header(format!(
                        "{} ({} logs, {} yd, {})",
                        g.job_name,
                        g.logs.len(),
                        format_number(g.total_yardage),
                        money(cfg, g.total_revenue)
                    ));
                    print_table(&log_table(&g.logs, cfg), cfg, "");
                    println!();
                }
                return Ok(());
            }

            let logs = match (job, crew) {
                (Some(job_id), _) => JobLogLogic::list_by_job(&mut pool, &session, job_id, &range)?,
                (None, Some(crew_id)) => {
                    JobLogLogic::list_for_crew(&mut pool, &session, Some(crew_id), &range)?
                }
                (None, None) if session.is_admin() => JobLogLogic::list_all(&mut pool, &session, &range)?,
                (None, None) => JobLogLogic::list_for_crew(&mut pool, &session, None, &range)?,
            };
            let logs = search_job_logs(logs, search.as_deref());

            header(format!("Job logs ({})", range.describe()));
            print_table(&log_table(&logs, cfg), cfg, "No job logs found.");
            if !logs.is_empty() {
                println!();
                print_stats(&job_log_stats(&logs), cfg);
            }
        }
        JobLogAction::Stats { crew, filters } => {
            let range = resolve_filters(filters)?;
            let stats = JobLogLogic::stats(&mut pool, &session, crew.as_deref(), &range)?;
            header(format!("Job log stats ({})", range.describe()));
            print_stats(&stats, cfg);
        }
        JobLogAction::Delete { id } => {
            JobLogLogic::delete(&mut pool, &session, id)?;
            success(format!("Job log deleted: {id}"));
        }
    }
    Ok(())
}
