//! Time-of-day digest trigger.

use crate::core::{DigestLogic, LineRepository};
use crate::notify::Notifier;
use crate::utils::date::today_utc;
use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use std::sync::Arc;
use tokio::sync::watch;

/// Next instant strictly after `now` whose wall-clock time is one of `times`.
///
/// Local times that do not exist on a given day (DST gaps) are skipped.
pub fn next_fire<Tz: TimeZone>(now: &DateTime<Tz>, times: &[NaiveTime]) -> Option<DateTime<Tz>> {
    let mut sorted = times.to_vec();
    sorted.sort();
    sorted.dedup();

    let tz = now.timezone();
    let today = now.date_naive();

    (0..=2u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .flat_map(|day| sorted.iter().map(move |t| day.and_time(*t)))
        .filter_map(|naive| tz.from_local_datetime(&naive).earliest())
        .find(|candidate| candidate > now)
}

/// Sends each configured line's digest at the configured times of day.
pub struct DigestScheduler {
    times: Vec<NaiveTime>,
    lines: Vec<LineRepository>,
    notifier: Arc<dyn Notifier>,
}

impl DigestScheduler {
    pub fn new(times: Vec<NaiveTime>, lines: Vec<LineRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            times,
            lines,
            notifier,
        }
    }

    /// Runs until `shutdown` flips to true or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        if self.times.is_empty() || self.lines.is_empty() {
            tracing::info!("digest scheduler disabled: no times or lines configured");
            return;
        }

        loop {
            let now = Local::now();
            let Some(at) = next_fire(&now, &self.times) else {
                tracing::warn!("digest scheduler found no upcoming fire time, stopping");
                return;
            };
            let wait = (at.clone() - now).to_std().unwrap_or_default();
            tracing::debug!(next = %at, "digest scheduled");

            tokio::select! {
                _ = tokio::time::sleep(wait) => self.fire().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("digest scheduler stopped");
                        return;
                    }
                }
            }
        }
    }

    async fn fire(&self) {
        let day = today_utc();
        for repo in &self.lines {
            let repo = repo.clone();
            let notifier = self.notifier.clone();
            let line = repo.line().to_string();

            let result =
                tokio::task::spawn_blocking(move || DigestLogic::send(&repo, &day, notifier.as_ref())).await;

            match result {
                Ok(Ok(count)) => tracing::info!(line = %line, %day, entries = count, "scheduled digest sent"),
                Ok(Err(e)) => tracing::error!(line = %line, %day, error = %e, "scheduled digest failed"),
                Err(e) => tracing::error!(line = %line, %day, error = %e, "scheduled digest task panicked"),
            }
        }
    }
}
