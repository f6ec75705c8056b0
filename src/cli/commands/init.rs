use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::write_log;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Creates the config directory and file (unless `--test`), then the
/// SQLite database with every migration applied.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing rattendance…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", cfg.database));

    let store = SqliteStore::open(&cfg.database)?;

    if let Err(e) = store.with_conn(|c| {
        write_log(
            c,
            "init",
            "database",
            &format!("Database initialized at {}", cfg.database),
        )
    }) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
