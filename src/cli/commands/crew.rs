use crate::cli::parser::{Commands, CrewAction};
use crate::config::Config;
use crate::core::crews::CrewLogic;
use crate::errors::AppResult;
use crate::models::crew::{Crew, CrewInput};
use crate::ui::messages::success;
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;

use super::{authenticate, print_table};

fn crew_table(crews: &[Crew]) -> Table {
    let mut t = Table::new(["ID", "Name", "Trade"]);
    for c in crews {
        t.add_row(vec![c.id.clone(), c.name.clone(), or_dash(c.trade_name.as_deref())]);
    }
    t
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Crew { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        CrewAction::List => {
            let crews = CrewLogic::list(&mut pool, &session)?;
            print_table(&crew_table(&crews), cfg, "No crews found.");
        }
        CrewAction::Get { id } => {
            let crew = CrewLogic::get(&mut pool, &session, id)?;
            print_table(&crew_table(&[crew]), cfg, "");
        }
        CrewAction::Create { name, trade } => {
            let input = CrewInput {
                name: name.clone(),
                trade_id: trade.clone(),
            };
            let crew = CrewLogic::create(&mut pool, &session, &input)?;
            success(format!("Crew created: {} ({})", crew.name, crew.id));
        }
        CrewAction::Update { id, name, trade } => {
            let input = CrewInput {
                name: name.clone(),
                trade_id: trade.clone(),
            };
            let crew = CrewLogic::update(&mut pool, &session, id, &input)?;
            success(format!("Crew updated: {}", crew.name));
        }
        CrewAction::Delete { id } => {
            CrewLogic::delete(&mut pool, &session, id)?;
            success(format!("Crew deleted: {id}"));
        }
    }
    Ok(())
}
