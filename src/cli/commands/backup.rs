use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

use super::authenticate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let (mut pool, session) = authenticate(cfg)?;
        BackupLogic::backup(&mut pool, &session, cfg, file, *compress, *force)?;
    }
    Ok(())
}
