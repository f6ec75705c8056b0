//! Post-commit side effects of an accepted check-in.

use super::{Digest, Notifier};
use crate::core::completion::RosterComplete;
use std::sync::Arc;

/// Runs after a check-in has been stored. Implementations never report
/// failure back to the check-in.
pub trait PostCommitHook: Send + Sync {
    fn on_roster_complete(&self, event: RosterComplete);
}

/// Mails the digest when a roster completes; failures are only logged.
pub struct NotifyHook {
    notifier: Arc<dyn Notifier>,
}

impl NotifyHook {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl PostCommitHook for NotifyHook {
    fn on_roster_complete(&self, event: RosterComplete) {
        let digest = Digest::roster_complete(&event.line, event.day, event.entries);

        tracing::info!(
            line = %digest.line,
            day = %digest.day,
            notifier = self.notifier.name(),
            "all stations marked, sending attendance digest"
        );

        if let Err(e) = self.notifier.send(&digest) {
            tracing::error!(
                line = %digest.line,
                day = %digest.day,
                error = %e,
                "failed to send attendance digest"
            );
        }
    }
}
