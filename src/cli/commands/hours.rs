use crate::cli::parser::{Commands, HoursAction};
use crate::config::Config;
use crate::core::calculator::stats::{hours_stats, own_hours_stats};
use crate::core::filters::search_hours;
use crate::core::hours::HoursLogic;
use crate::errors::AppResult;
use crate::models::hours::HoursInput;
use crate::ui::messages::{header, success};
use crate::utils::date::parse_date_arg;
use crate::utils::formatting::{format_number, or_dash};
use crate::utils::table::Table;

use super::{authenticate, money, print_table, resolve_filters};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Hours { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        HoursAction::Submit { date, hours, notes } => {
            let input = HoursInput {
                date_worked: parse_date_arg(date)?,
                hours_worked: *hours,
                notes: notes.clone(),
            };
            let entry = HoursLogic::submit(&mut pool, &session, &input)?;
            success(format!(
                "Hours submitted: {}h on {} ({})",
                format_number(entry.hours_worked),
                entry.date_worked,
                entry.id
            ));
        }
        HoursAction::Update {
            id,
            date,
            hours,
            notes,
        } => {
            let current = HoursLogic::get_own(&mut pool, &session, id)?;
            let input = HoursInput {
                date_worked: match date {
                    Some(d) => parse_date_arg(d)?,
                    None => current.date_worked,
                },
                hours_worked: hours.unwrap_or(current.hours_worked),
                notes: notes.clone().or(current.notes),
            };
            let entry = HoursLogic::update(&mut pool, &session, id, &input)?;
            success(format!(
                "Hours updated: {}h on {}",
                format_number(entry.hours_worked),
                entry.date_worked
            ));
        }
        HoursAction::Delete { id } => {
            HoursLogic::delete(&mut pool, &session, id)?;
            success(format!("Hours entry deleted: {id}"));
        }
        HoursAction::List {
            all,
            filters,
            search,
        } => {
            let range = resolve_filters(filters)?;

            if *all {
                let entries = HoursLogic::list_all(&mut pool, &session, &range)?;
                let entries = search_hours(entries, search.as_deref());

                header(format!("Hours ({})", range.describe()));
                let mut t = Table::new(["ID", "Date", "Worker", "Crew", "Hours", "Pay", "Notes"]);
                for h in &entries {
                    t.add_row(vec![
                        h.hours.id.clone(),
                        h.hours.date_worked.to_string(),
                        h.worker_name(),
                        or_dash(h.crew_name.as_deref()),
                        format_number(h.hours.hours_worked),
                        money(cfg, h.pay()),
                        or_dash(h.hours.notes.as_deref()),
                    ]);
                }
                print_table(&t, cfg, "No hours found.");

                if !entries.is_empty() {
                    let s = hours_stats(&entries);
                    println!();
                    println!(
                        "Entries: {}   Hours: {}   Pay: {}",
                        s.entries,
                        format_number(s.total_hours),
                        money(cfg, s.total_pay)
                    );
                }
                return Ok(());
            }

            let entries = HoursLogic::list_own(&mut pool, &session, &range)?;
            header(format!("My hours ({})", range.describe()));
            let mut t = Table::new(["ID", "Date", "Hours", "Notes"]);
            for h in &entries {
                t.add_row(vec![
                    h.id.clone(),
                    h.date_worked.to_string(),
                    format_number(h.hours_worked),
                    or_dash(h.notes.as_deref()),
                ]);
            }
            print_table(&t, cfg, "No hours found.");

            if !entries.is_empty() {
                let s = own_hours_stats(&entries, session.profile.hourly_rate);
                println!();
                println!(
                    "Entries: {}   Hours: {}   Earnings: {}",
                    s.entries,
                    format_number(s.total_hours),
                    money(cfg, s.total_pay)
                );
            }
        }
    }
    Ok(())
}
