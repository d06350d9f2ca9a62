use crate::cli::parser::{Commands, TradeAction};
use crate::config::Config;
use crate::core::trades::TradeLogic;
use crate::errors::AppResult;
use crate::models::trade::{Trade, TradeInput};
use crate::ui::messages::success;
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;

use super::{authenticate, print_table};

fn trade_table(trades: &[Trade]) -> Table {
    let mut t = Table::new(["ID", "Trade", "Department", "Description"]);
    for tr in trades {
        t.add_row(vec![
            tr.id.clone(),
            tr.trade_name.clone(),
            or_dash(tr.department_id.as_deref()),
            or_dash(tr.description.as_deref()),
        ]);
    }
    t
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Trade { action } = cmd else {
        return Ok(());
    };
    let (mut pool, session) = authenticate(cfg)?;

    match action {
        TradeAction::List => {
            let trades = TradeLogic::list(&mut pool, &session)?;
            print_table(&trade_table(&trades), cfg, "No trades found.");
        }
        TradeAction::Get { id } => {
            let trade = TradeLogic::get(&mut pool, &session, id)?;
            print_table(&trade_table(&[trade]), cfg, "");
        }
        TradeAction::Create {
            name,
            department,
            description,
        } => {
            let input = TradeInput {
                trade_name: name.clone(),
                department_id: department.clone(),
                description: description.clone(),
            };
            let trade = TradeLogic::create(&mut pool, &session, &input)?;
            success(format!("Trade created: {} ({})", trade.trade_name, trade.id));
        }
        TradeAction::Update {
            id,
            name,
            department,
            description,
        } => {
            let input = TradeInput {
                trade_name: name.clone(),
                department_id: department.clone(),
                description: description.clone(),
            };
            let trade = TradeLogic::update(&mut pool, &session, id, &input)?;
            success(format!("Trade updated: {}", trade.trade_name));
        }
        TradeAction::Delete { id } => {
            TradeLogic::delete(&mut pool, &session, id)?;
            success(format!("Trade deleted: {id}"));
        }
    }
    Ok(())
}
