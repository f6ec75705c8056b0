//! Digest notifications: what is sent, how it is rendered and who sends it.

pub mod hook;
pub mod log;
pub mod mail;
pub mod render;

pub use hook::{NotifyHook, PostCommitHook};
pub use log::LogNotifier;
pub use mail::SmtpNotifier;

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::AttendanceView;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

pub const ROSTER_COMPLETE_TITLE: &str = "All Stations Attendance Marked";
pub const DAILY_TITLE: &str = "Attendance Data";

/// One row of a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestEntry {
    pub operator_name: String,
    pub employee_id: String,
    pub station: String,
    pub timestamp: String,
    pub status: String,
}

impl From<&AttendanceView> for DigestEntry {
    fn from(v: &AttendanceView) -> Self {
        Self {
            operator_name: v.operator_name.clone(),
            employee_id: v.employee_id.clone(),
            station: v.station.clone(),
            timestamp: v.timestamp.clone(),
            status: v.status.to_string(),
        }
    }
}

/// A day's attendance for one line, ready to be delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub line: String,
    pub day: NaiveDate,
    pub title: String,
    pub entries: Vec<DigestEntry>,
}

impl Digest {
    pub fn roster_complete(line: &str, day: NaiveDate, entries: Vec<DigestEntry>) -> Self {
        Self {
            line: line.to_string(),
            day,
            title: ROSTER_COMPLETE_TITLE.to_string(),
            entries,
        }
    }

    pub fn daily(line: &str, day: NaiveDate, entries: Vec<DigestEntry>) -> Self {
        Self {
            line: line.to_string(),
            day,
            title: DAILY_TITLE.to_string(),
            entries,
        }
    }

    pub fn subject(&self) -> String {
        format!("{} - {} {}", self.title, self.line, self.day.format("%Y-%m-%d"))
    }

    pub fn attachment_name(&self) -> String {
        format!("attendance-{}-{}.csv", self.line, self.day.format("%Y-%m-%d"))
    }
}

/// Delivery target for digests.
pub trait Notifier: Send + Sync {
    fn send(&self, digest: &Digest) -> AppResult<()>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

/// SMTP when a mail section is configured, the log otherwise.
pub fn build_notifier(cfg: &Config) -> AppResult<Arc<dyn Notifier>> {
    match &cfg.mail {
        Some(mail) => Ok(Arc::new(SmtpNotifier::new(mail)?)),
        None => Ok(Arc::new(LogNotifier)),
    }
}
