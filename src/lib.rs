//! tradetracker library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as c;

    match &cli.command {
        Commands::Init { .. } => c::init::handle(cli),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            c::auth::handle(&cli.command, cfg)
        }
        Commands::Dashboard => c::dashboard::handle(&cli.command, cfg),
        Commands::Profile { .. } => c::profile::handle(&cli.command, cfg),
        Commands::User { .. } => c::user::handle(&cli.command, cfg),
        Commands::Crew { .. } => c::crew::handle(&cli.command, cfg),
        Commands::Trade { .. } => c::trade::handle(&cli.command, cfg),
        Commands::Job { .. } => c::job::handle(&cli.command, cfg),
        Commands::Elevation { .. } => c::elevation::handle(&cli.command, cfg),
        Commands::JobLog { .. } => c::joblog::handle(&cli.command, cfg),
        Commands::Hours { .. } => c::hours::handle(&cli.command, cfg),
        Commands::LegacyJob { .. } => c::legacy_job::handle(&cli.command, cfg),
        Commands::Report { .. } => c::report::handle(&cli.command, cfg),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => c::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
    }
}

/// Short name of the command, used as audit target for failures.
fn command_name(cmd: &Commands) -> &'static str {
    match cmd {
        Commands::Init { .. } => "init",
        Commands::Login { .. } => "login",
        Commands::Logout => "logout",
        Commands::Whoami => "whoami",
        Commands::Dashboard => "dashboard",
        Commands::Profile { .. } => "profile",
        Commands::User { .. } => "user",
        Commands::Crew { .. } => "crew",
        Commands::Trade { .. } => "trade",
        Commands::Job { .. } => "job",
        Commands::Elevation { .. } => "elevation",
        Commands::JobLog { .. } => "joblog",
        Commands::Hours { .. } => "hours",
        Commands::LegacyJob { .. } => "legacy-job",
        Commands::Report { .. } => "report",
        Commands::Config { .. } => "config",
        Commands::Db { .. } => "db",
        Commands::Log { .. } => "log",
        Commands::Backup { .. } => "backup",
        Commands::Export { .. } => "export",
    }
}

/// Record a failed command in the audit log, when the database is there.
fn log_failure(cfg: &Config, cmd: &Commands, err: &errors::AppError) {
    if !Path::new(&cfg.database).exists() {
        return;
    }
    if let Ok(pool) = db::pool::DbPool::new(&cfg.database) {
        let _ = db::log::ttlog(&pool.conn, "error", command_name(cmd), &err.to_string());
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load the config once, then apply the --db override
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg).inspect_err(|e| log_failure(&cfg, &cli.command, e))
}
