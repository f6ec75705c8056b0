use super::operator::{Operator, display_fields};
use super::status::AttendanceStatus;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

/// Render an instant the way it is stored: RFC 3339, UTC, milliseconds.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A stored check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub line: String,
    pub operator_id: String,
    pub date: NaiveDate,           // ⇔ attendance.date (TEXT "YYYY-MM-DD", UTC day)
    pub timestamp: DateTime<Utc>,  // ⇔ attendance.timestamp (TEXT RFC 3339)
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn timestamp_str(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    /// Join this record with its operator (if any) for display.
    pub fn view(&self, operator: Option<&Operator>) -> AttendanceView {
        let (operator_name, employee_id, station) = display_fields(operator);
        AttendanceView {
            id: self.id,
            operator_id: self.operator_id.clone(),
            operator_name,
            employee_id,
            station,
            date: self.date_str(),
            timestamp: self.timestamp_str(),
            status: self.status.clone(),
        }
    }
}

/// A check-in that passed the dedup gate and is about to be appended.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub operator_id: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub status: AttendanceStatus,
}

impl NewRecord {
    pub fn present(operator_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            operator_id: operator_id.into(),
            date: timestamp.date_naive(),
            timestamp,
            status: AttendanceStatus::Present,
        }
    }
}

/// Record joined with the operator's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    pub id: i64,
    pub operator_id: String,
    pub operator_name: String,
    pub employee_id: String,
    pub station: String,
    pub date: String,
    pub timestamp: String,
    pub status: AttendanceStatus,
}
