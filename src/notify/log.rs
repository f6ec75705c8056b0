use super::{Digest, Notifier};
use crate::errors::AppResult;

/// Writes digests to the tracing log instead of mailing them.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, digest: &Digest) -> AppResult<()> {
        tracing::info!(
            line = %digest.line,
            day = %digest.day,
            entries = digest.entries.len(),
            "{} (mail not configured)",
            digest.subject()
        );
        for e in &digest.entries {
            tracing::info!(
                operator = %e.operator_name,
                employee_id = %e.employee_id,
                station = %e.station,
                timestamp = %e.timestamp,
                status = %e.status,
                "digest entry"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
