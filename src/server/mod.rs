//! HTTP server setup and lifecycle management

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

use crate::config::Config;
use crate::core::{CheckinLogic, LineRegistry};
use crate::db::{AttendanceStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::notify::{NotifyHook, build_notifier};
use crate::scheduler::DigestScheduler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Wire the state shared by handlers and the scheduler from a config.
pub fn build_state(config: &Config, store: Arc<dyn AttendanceStore>) -> AppResult<AppState> {
    let registry = Arc::new(LineRegistry::new(&config.lines, store));
    let notifier = build_notifier(config)?;
    let hook = Arc::new(NotifyHook::new(notifier.clone()));
    let checkin = Arc::new(CheckinLogic::new(config.cooldown()));
    Ok(AppState::new(registry, checkin, hook, notifier))
}

/// Attendance HTTP server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    pub fn new(config: Config, store: Arc<SqliteStore>) -> AppResult<Self> {
        let state = build_state(&config, store)?;
        Ok(Self { config, state })
    }

    pub async fn run(self, addr: SocketAddr) -> AppResult<()> {
        let app = create_router(self.state.clone(), self.config.server.cors_origin.as_deref())?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("attendance server listening on {}", addr);
        tracing::info!(
            lines = ?self.config.lines,
            cooldown_minutes = self.config.cooldown_minutes,
            notifier = self.state.notifier.name(),
            "serving"
        );

        // Digest trigger in background
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = DigestScheduler::new(
            self.config.digest_times()?,
            self.config
                .digest_lines()
                .iter()
                .map(|l| self.state.registry.get(l).cloned())
                .collect::<AppResult<Vec<_>>>()?,
            self.state.notifier.clone(),
        );
        let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::Server(e.to_string()))?;

        tracing::info!("attendance server shutting down");

        let _ = shutdown_tx.send(true);
        if let Err(e) = scheduler_task.await {
            tracing::warn!(error = %e, "digest scheduler did not stop cleanly");
        }

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received terminate signal, initiating graceful shutdown");
        }
    }
}
