use crate::cli::parser::{Commands, ElevationAction};
use crate::config::Config;
use crate::core::elevations::ElevationLogic;
use crate::errors::AppResult;
use crate::models::job::{ElevationInput, ElevationUpdate, JobElevation};
use crate::ui::messages::success;
use crate::utils::formatting::format_number;
use crate::utils::table::Table;

use super::{authenticate, money, print_table};

fn elevation_table(rows: &[JobElevation], cfg: &Config) -> Table {
    let mut t = Table::new(["ID", "Name", "Yardage", "Rate", "Total"]);
    for e in rows {
        t.add_row(vec![
            e.id.clone(),
            e.elevation_name.clone(),
            format_number(e.yardage),
            money(cfg, e.rate),
            money(cfg, e.total),
        ]);
    }
    t
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Elevation { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        ElevationAction::List { job } => {
            let rows = ElevationLogic::list(&mut pool, &session, job)?;
            print_table(&elevation_table(&rows, cfg), cfg, "No elevations for this job.");
        }
        ElevationAction::Get { id } => {
            let e = ElevationLogic::get(&mut pool, &session, id)?;
            print_table(&elevation_table(&[e], cfg), cfg, "");
        }
        ElevationAction::Add {
            job,
            name,
            yardage,
            rate,
        } => {
            let input = ElevationInput {
                job_id: job.clone(),
                elevation_name: name.clone(),
                yardage: *yardage,
                rate: *rate,
            };
            let e = ElevationLogic::add(&mut pool, &session, &input)?;
            success(format!(
                "Elevation added: {} ({}) total {}",
                e.elevation_name,
                e.id,
                money(cfg, e.total)
            ));
        }
        ElevationAction::Update {
            id,
            name,
            yardage,
            rate,
        } => {
            let update = ElevationUpdate {
                elevation_name: name.clone(),
                yardage: *yardage,
                rate: *rate,
            };
            let e = ElevationLogic::update(&mut pool, &session, id, &update)?;
            success(format!(
                "Elevation updated: {} total {}",
                e.elevation_name,
                money(cfg, e.total)
            ));
        }
        ElevationAction::Delete { id } => {
            ElevationLogic::delete(&mut pool, &session, id)?;
            success(format!("Elevation deleted: {id}"));
        }
    }
    Ok(())
}
