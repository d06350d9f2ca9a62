use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::calculator::compliance::weekly_crew_summary;
use crate::errors::AppResult;
use crate::models::compliance::WeeklyCrewSummary;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{GREEN, RED, RESET, color_for_amount};
use crate::utils::date::{monday_of_week, parse_date};
use crate::utils::formatting::format_number;
use crate::utils::table::Table;

use super::{authenticate, money, print_table};

fn print_summary(s: &WeeklyCrewSummary, cfg: &Config) {
    header(format!("Week {} → {}", s.week_start, s.week_end));

    let mut t = Table::new(["Worker", "Rate", "Hours", "Minimum pay"]);
    for w in &s.workers {
        t.add_row(vec![
            w.full_name.clone(),
            money(cfg, w.hourly_rate),
            format_number(w.total_hours),
            money(cfg, w.minimum_required_pay),
        ]);
    }
    print_table(&t, cfg, "No hours logged by this crew in the week.");
    println!();

    println!("Job earnings:      {}", money(cfg, s.total_job_earnings));
    println!("Minimum required:  {}", money(cfg, s.total_minimum_required));
    println!(
        "Bonus pool:        {}{}{}",
        color_for_amount(s.bonus_pool),
        money(cfg, s.bonus_pool),
        RESET
    );
    if s.is_compliant {
        println!("Status:            {GREEN}COMPLIANT{RESET}");
    } else {
        println!("Status:            {RED}NOT COMPLIANT{RESET}");
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        ReportAction::Weekly {
            crew,
            week_start,
            source,
            json,
        } => {
            let summary = weekly_crew_summary(&mut pool, &session, crew, week_start, *source)?;

            if *json {
                // stdout carries only the JSON document
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            if let Some(d) = parse_date(week_start)
                && monday_of_week(d) != d
            {
                warning(format!("{d} is not a Monday; the week runs {d} → {}", summary.week_end));
            }
            print_summary(&summary, cfg);
        }
    }
    Ok(())
}
