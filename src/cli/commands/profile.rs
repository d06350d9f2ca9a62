use crate::cli::parser::{Commands, ProfileAction};
use crate::config::Config;
use crate::core::profile::ProfileLogic;
use crate::errors::AppResult;
use crate::models::profile::{Profile, ProfileUpdate};
use crate::ui::messages::success;
use crate::utils::formatting::or_dash;

use super::{authenticate, money};

fn print_profile(p: &Profile, cfg: &Config) {
    println!("First name: {}", p.first_name);
    println!("Last name:  {}", p.last_name);
    println!("Email:      {}", p.email);
    println!("Phone:      {}", or_dash(p.phone_number.as_deref()));
    println!("Role:       {}", p.role.label());
    println!("Crew:       {}", or_dash(p.crew_name.as_deref()));
    if let Some(rate) = p.hourly_rate {
        println!("Rate:       {}/h", money(cfg, rate));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        ProfileAction::Show => {
            let p = ProfileLogic::show(&mut pool, &session)?;
            print_profile(&p, cfg);
        }
        ProfileAction::Update {
            first_name,
            last_name,
            phone,
        } => {
            let update = ProfileUpdate {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone_number: phone.clone(),
            };
            let p = ProfileLogic::update(&mut pool, &session, &update)?;
            success("Profile updated.");
            print_profile(&p, cfg);
        }
    }
    Ok(())
}
