//! Application state for API handlers

use crate::core::{CheckinLogic, LineRegistry};
use crate::notify::{Notifier, PostCommitHook};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Line id → repository
    pub registry: Arc<LineRegistry>,

    /// Dedup gate
    pub checkin: Arc<CheckinLogic>,

    /// Side effects run after an accepted check-in
    pub hook: Arc<dyn PostCommitHook>,

    /// Target of on-demand digests
    pub notifier: Arc<dyn Notifier>,

    pub version: String,
}

impl AppState {
    pub fn new(
        registry: Arc<LineRegistry>,
        checkin: Arc<CheckinLogic>,
        hook: Arc<dyn PostCommitHook>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            registry,
            checkin,
            hook,
            notifier,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
