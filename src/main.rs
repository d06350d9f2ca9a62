//! tradetracker main entrypoint.

use tradetracker::run;
use tradetracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
