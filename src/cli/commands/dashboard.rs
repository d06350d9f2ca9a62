use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{Dashboard, DashboardLogic};
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::date::today;
use crate::utils::formatting::{format_number, format_user_greeting, or_dash};
use crate::utils::table::Table;

use super::joblog::print_stats;
use super::{authenticate, money, print_table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Dashboard) {
        return Ok(());
    }
    let (mut pool, session) = authenticate(cfg)?;

    match DashboardLogic::build(&mut pool, &session, today(), cfg.recent_limit)? {
        Dashboard::Admin { profile, all_time } => {
            header(format!(
                "Admin dashboard, {}",
                format_user_greeting(&profile.first_name, &profile.last_name)
            ));
            println!("All-time job logs");
            print_stats(&all_time, cfg);
        }
        Dashboard::Foreman {
            profile,
            week,
            crew_week,
            recent,
        } => {
            header(format!(
                "Foreman dashboard, {}",
                format_user_greeting(&profile.first_name, &profile.last_name)
            ));
            let Some(stats) = crew_week else {
                warning("You are not assigned to a crew yet. Ask an administrator.");
                return Ok(());
            };
            println!("Crew: {}", or_dash(profile.crew_name.as_deref()));
            println!("This week ({})", week.describe());
            print_stats(&stats, cfg);
            println!();

            println!("Recent job logs");
            let mut t = Table::new(["Date", "Job", "Elevation", "Lot", "Total"]);
            for l in &recent {
                t.add_row(vec![
                    l.date_worked.to_string(),
                    l.job_name.clone(),
                    l.elevation_name.clone(),
                    or_dash(l.lot.as_deref()),
                    money(cfg, l.total),
                ]);
            }
            print_table(&t, cfg, "No job logs yet.");
        }
        Dashboard::Worker {
            profile,
            week,
            week_hours,
        } => {
            header(format!(
                "Worker dashboard, {}",
                format_user_greeting(&profile.first_name, &profile.last_name)
            ));
            println!("Crew: {}", or_dash(profile.crew_name.as_deref()));
            println!(
                "Rate: {}",
                profile
                    .hourly_rate
                    .map(|r| format!("{}/h", money(cfg, r)))
                    .unwrap_or_else(|| "--".into())
            );
            println!("This week ({})", week.describe());
            println!(
                "Entries: {}   Hours: {}   Earnings: {}",
                week_hours.entries,
                format_number(week_hours.total_hours),
                money(cfg, week_hours.total_pay)
            );
        }
    }
    Ok(())
}
