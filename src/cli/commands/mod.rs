pub mod checkin;
pub mod config;
pub mod db;
pub mod digest;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod operator;
pub mod serve;

use crate::config::Config;
use crate::core::LineRegistry;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use std::sync::Arc;

/// Open the configured database and bind it to the configured lines.
pub(crate) fn open_registry(cfg: &Config) -> AppResult<LineRegistry> {
    let store = Arc::new(SqliteStore::open(&cfg.database)?);
    Ok(LineRegistry::new(&cfg.lines, store))
}
