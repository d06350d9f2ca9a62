use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;

use super::{authenticate, resolve_filters};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        filters,
        search,
        crew,
        week_start,
        source,
        force,
    } = cmd
    {
        let (mut pool, session) = authenticate(cfg)?;
        let req = ExportRequest {
            target: *what,
            format: *format,
            file: file.clone(),
            range: resolve_filters(filters)?,
            search: search.clone(),
            crew_id: crew.clone(),
            week_start: week_start.clone(),
            source: *source,
            force: *force,
        };
        ExportLogic::export(&mut pool, &session, &req)?;
    }
    Ok(())
}
