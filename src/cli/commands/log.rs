use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

use super::authenticate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let (mut pool, session) = authenticate(cfg)?;
        LogLogic::print_log(&mut pool, &session, *limit)?;
    }

    Ok(())
}
