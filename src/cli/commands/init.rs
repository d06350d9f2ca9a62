use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the first administrator, when `--admin-email` is given
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init {
        admin_email,
        admin_password,
        first_name,
        last_name,
    } = &cli.command
    else {
        return Ok(());
    };

    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    info("Initializing tradetracker…");

    let mut pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    success(format!("Database initialized at {db_path}"));

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {db_path}"),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    if let (Some(email), Some(password)) = (admin_email, admin_password) {
        let admin = AuthLogic::bootstrap_admin(
            &mut pool,
            &cfg,
            email,
            password,
            first_name.as_deref().unwrap_or_default(),
            last_name.as_deref().unwrap_or_default(),
        )?;
        success(format!("Administrator created: {} <{}>", admin.full_name(), admin.email));
    }

    success("tradetracker initialization completed!");
    Ok(())
}
