use crate::cli::parser::{Commands, JobAction};
use crate::config::Config;
use crate::core::job_templates::JobTemplateLogic;
use crate::errors::AppResult;
use crate::models::job::{JobTemplate, JobTemplateUpdate, JobWithElevations};
use crate::ui::messages::success;
use crate::utils::formatting::format_number;
use crate::utils::table::Table;

use super::{authenticate, money, print_table};

fn status(job: &JobTemplate) -> &'static str {
    if job.active { "active" } else { "archived" }
}

fn print_with_elevations(jobs: &[JobWithElevations], cfg: &Config) {
    for j in jobs {
        println!("{} [{}] ({})", j.job.job_name, status(&j.job), j.job.id);
        let mut t = Table::new(["  Elevation ID", "Name", "Yardage", "Rate", "Total"]);
        for e in &j.job_elevations {
            t.add_row(vec![
                format!("  {}", e.id),
                e.elevation_name.clone(),
                format_number(e.yardage),
                money(cfg, e.rate),
                money(cfg, e.total),
            ]);
        }
        print_table(&t, cfg, "  (no elevations)");
        println!();
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Job { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        JobAction::List { active, elevations } => {
            // foremen only ever see active templates
            let active_only = *active || !session.is_admin();
            if *elevations {
                let jobs = JobTemplateLogic::list_with_elevations(&mut pool, &session, active_only)?;
                if jobs.is_empty() {
                    crate::ui::messages::info("No job templates found.");
                }
                print_with_elevations(&jobs, cfg);
            } else {
                let jobs = JobTemplateLogic::list(&mut pool, &session, active_only)?;
                let mut t = Table::new(["ID", "Job", "Status", "Created"]);
                for j in &jobs {
                    t.add_row(vec![
                        j.id.clone(),
                        j.job_name.clone(),
                        status(j).to_string(),
                        j.created_at.chars().take(10).collect(),
                    ]);
                }
                print_table(&t, cfg, "No job templates found.");
            }
        }
        JobAction::Get { id } => {
            let job = JobTemplateLogic::get(&mut pool, &session, id)?;
            print_with_elevations(&[job], cfg);
        }
        JobAction::Create { name, inactive } => {
            let job = JobTemplateLogic::create(&mut pool, &session, name, !*inactive)?;
            success(format!("Job template created: {} ({})", job.job_name, job.id));
        }
        JobAction::Update { id, name } => {
            let update = JobTemplateUpdate {
                job_name: Some(name.clone()),
                active: None,
            };
            let job = JobTemplateLogic::update(&mut pool, &session, id, &update)?;
            success(format!("Job template updated: {}", job.job_name));
        }
        JobAction::Archive { id } => {
            let job = JobTemplateLogic::archive(&mut pool, &session, id)?;
            success(format!("Job template archived: {}", job.job_name));
        }
        JobAction::Reactivate { id } => {
            let job = JobTemplateLogic::reactivate(&mut pool, &session, id)?;
            success(format!("Job template reactivated: {}", job.job_name));
        }
        JobAction::Delete { id } => {
            JobTemplateLogic::delete(&mut pool, &session, id)?;
            success(format!("Job template deleted: {id}"));
        }
    }
    Ok(())
}
