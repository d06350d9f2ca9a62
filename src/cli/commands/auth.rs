use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{or_dash, format_user_greeting};

use super::{authenticate, money, open_pool};

/// `login`, `logout` and `whoami`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Login { email, password } => {
            let mut pool = open_pool(cfg)?;
            let session = AuthLogic::login(&mut pool, cfg, email, password)?;
            AuthLogic::save_token(&cfg.session_file(), &session.token)?;
            success(format!(
                "Welcome, {} ({})",
                format_user_greeting(&session.profile.first_name, &session.profile.last_name),
                session.role().label()
            ));
        }
        Commands::Logout => {
            match authenticate(cfg) {
                Ok((mut pool, session)) => AuthLogic::logout(&mut pool, &session)?,
                Err(_) => info("No active session."),
            }
            AuthLogic::clear_token(&cfg.session_file())?;
            success("Logged out.");
        }
        Commands::Whoami => {
            let (_pool, session) = authenticate(cfg)?;
            let p = &session.profile;
            println!("Name:   {}", p.full_name());
            println!("Email:  {}", p.email);
            println!("Role:   {}", p.role.label());
            println!("Crew:   {}", or_dash(p.crew_name.as_deref()));
            println!(
                "Rate:   {}",
                p.hourly_rate
                    .map(|r| format!("{}/h", money(cfg, r)))
                    .unwrap_or_else(|| "--".into())
            );
        }
        _ => {}
    }
    Ok(())
}
