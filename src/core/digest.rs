use crate::core::registry::LineRepository;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::notify::{Digest, DigestEntry, Notifier};
use chrono::NaiveDate;

/// On-demand and scheduled digests.
pub struct DigestLogic;

impl DigestLogic {
    pub fn build(repo: &LineRepository, day: &NaiveDate) -> AppResult<Digest> {
        let entries = ReportLogic::list_day(repo, day)?
            .iter()
            .map(DigestEntry::from)
            .collect();
        Ok(Digest::daily(repo.line(), *day, entries))
    }

    /// Build and send the digest of `day`. Returns the number of entries sent.
    pub fn send(repo: &LineRepository, day: &NaiveDate, notifier: &dyn Notifier) -> AppResult<usize> {
        let digest = Self::build(repo, day)?;
        let count = digest.entries.len();

        match notifier.send(&digest) {
            Ok(()) => {
                repo.audit("digest", &format!("{} entries for {} via {}", count, day, notifier.name()));
                Ok(count)
            }
            Err(e) => {
                repo.audit("digest_failed", &format!("{}: {}", day, e));
                Err(e)
            }
        }
    }
}
