use crate::cli::parser::{Commands, LegacyJobAction};
use crate::config::Config;
use crate::core::calculator::stats::legacy_job_stats;
use crate::core::legacy_jobs::LegacyJobLogic;
use crate::errors::AppResult;
use crate::models::legacy_job::LegacyJobInput;
use crate::ui::messages::{header, success};
use crate::utils::formatting::{format_number, or_dash};
use crate::utils::table::Table;

use super::joblog::print_stats;
use super::{authenticate, money, parse_opt_date, print_table, resolve_filters};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::LegacyJob { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        LegacyJobAction::Add {
            job_name,
            elevation,
            lot_address,
            yardage,
            rate,
            date,
            notes,
        } => {
            let input = LegacyJobInput {
                job_name: job_name.clone(),
                elevation: elevation.clone(),
                lot_address: lot_address.clone(),
                yardage: *yardage,
                rate: *rate,
                notes: notes.clone(),
                date: parse_opt_date(date.as_deref())?,
            };
            let job = LegacyJobLogic::create(&mut pool, &session, &input)?;
            success(format!(
                "Legacy job recorded: {} on {} total {} ({})",
                job.job_name,
                job.date,
                money(cfg, job.total),
                job.id
            ));
        }
        LegacyJobAction::List {
            crew,
            filters,
            limit,
        } => {
            let range = resolve_filters(filters)?;
            let jobs = LegacyJobLogic::list(&mut pool, &session, crew.as_deref(), &range, *limit)?;

            header(format!("Legacy jobs ({})", range.describe()));
            let mut t = Table::new([
                "ID", "Date", "Job", "Elevation", "Lot", "Crew", "Yardage", "Rate", "Total",
            ]);
            for j in &jobs {
                t.add_row(vec![
                    j.id.clone(),
                    j.date.to_string(),
                    j.job_name.clone(),
                    or_dash(j.elevation.as_deref()),
                    or_dash(j.lot_address.as_deref()),
                    or_dash(j.crew_name.as_deref()),
                    format_number(j.yardage),
                    money(cfg, j.rate),
                    money(cfg, j.total),
                ]);
            }
            print_table(&t, cfg, "No legacy jobs found.");
            if !jobs.is_empty() {
                println!();
                print_stats(&legacy_job_stats(&jobs), cfg);
            }
        }
        LegacyJobAction::Stats { crew, filters } => {
            let range = resolve_filters(filters)?;
            let stats = LegacyJobLogic::stats(&mut pool, &session, crew.as_deref(), &range)?;
            header(format!("Legacy job stats ({})", range.describe()));
            print_stats(&stats, cfg);
        }
        LegacyJobAction::Delete { id } => {
            LegacyJobLogic::delete(&mut pool, &session, id)?;
            success(format!("Legacy job deleted: {id}"));
        }
    }
    Ok(())
}
