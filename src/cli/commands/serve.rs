use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::logging::init_tracing;
use crate::server::Server;
use std::net::SocketAddr;
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve {
        listen,
        log_level,
        json,
    } = cmd
    {
        init_tracing(log_level.as_deref().unwrap_or(&cfg.log_level), *json);

        let raw = listen.as_deref().unwrap_or(&cfg.server.listen_addr);
        let addr: SocketAddr = raw
            .parse()
            .map_err(|e| AppError::Config(format!("invalid listen address '{}': {}", raw, e)))?;

        let store = Arc::new(SqliteStore::open(&cfg.database)?);
        let server = Server::new(cfg.clone(), store)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(server.run(addr))?;
    }
    Ok(())
}
