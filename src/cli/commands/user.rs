use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::models::profile::{AdminProfileUpdate, CreateUserInput, Profile};
use crate::ui::messages::{success, warning};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;

use super::{authenticate, money, print_table};

fn user_row(p: &Profile, cfg: &Config) -> Vec<String> {
    vec![
        p.id.clone(),
        p.full_name(),
        p.email.clone(),
        p.role.label().to_string(),
        or_dash(p.crew_name.as_deref()),
        p.hourly_rate.map(|r| money(cfg, r)).unwrap_or_else(|| "--".into()),
    ]
}

fn print_user(p: &Profile, cfg: &Config) {
    let mut t = Table::new(["ID", "Name", "Email", "Role", "Crew", "Rate"]);
    t.add_row(user_row(p, cfg));
    print_table(&t, cfg, "");
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        UserAction::List => {
            let users = UserLogic::list(&mut pool, &session)?;
            let mut t = Table::new(["ID", "Name", "Email", "Role", "Crew", "Rate"]);
            for p in &users {
                t.add_row(user_row(p, cfg));
            }
            print_table(&t, cfg, "No users found.");
        }
        UserAction::Get { id } => {
            let p = UserLogic::get(&mut pool, &session, id)?;
            print_user(&p, cfg);
        }
        UserAction::Create {
            email,
            password,
            first_name,
            last_name,
            phone,
            role,
            crew,
            rate,
        } => {
            let input = CreateUserInput {
                email: email.clone(),
                password: password.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone_number: phone.clone(),
                role: *role,
                crew_id: crew.clone(),
                hourly_rate: *rate,
            };
            let outcome = UserLogic::create(&mut pool, &session, cfg, &input)?;
            match &outcome.warning {
                Some(w) => warning(w),
                None => success(format!("User created: {}", outcome.profile.email)),
            }
            print_user(&outcome.profile, cfg);
        }
        UserAction::Update {
            id,
            first_name,
            last_name,
            phone,
            clear_phone,
            role,
            crew,
            no_crew,
            rate,
            clear_rate,
        } => {
            let update = AdminProfileUpdate {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone_number: if *clear_phone {
                    Some(None)
                } else {
                    phone.clone().map(Some)
                },
                role: *role,
                crew_id: if *no_crew { Some(None) } else { crew.clone().map(Some) },
                hourly_rate: if *clear_rate { Some(None) } else { rate.map(Some) },
            };
            let p = UserLogic::update(&mut pool, &session, id, &update)?;
            success(format!("User updated: {}", p.email));
            print_user(&p, cfg);
        }
    }
    Ok(())
}
