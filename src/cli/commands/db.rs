use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        // Opening applies pending migrations already.
        let store = SqliteStore::open(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            let applied = store.with_conn(run_pending_migrations)?;
            success(format!("Migration completed ({} applied).", applied));
        }

        if *show_info {
            stats::print_db_info(&store)?;
        }

        if *check {
            info("Running integrity check…");
            let integrity: String =
                store.with_conn(|c| Ok(c.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {}", integrity));
            }
        }

        if *vacuum {
            info("Running VACUUM…");
            store.with_conn(|c| Ok(c.execute_batch("VACUUM;")?))?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
