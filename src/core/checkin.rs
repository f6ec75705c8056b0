use crate::core::completion::{self, RosterComplete};
use crate::core::registry::LineRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceView, NewRecord, format_timestamp};
use crate::utils::time::{from_float_millis, from_millis, is_storable, parse_timestamp};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Timestamp as sent by a kiosk: a date-time string or epoch milliseconds.
/// Browsers may send millis as a float (`1704873600000.0`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimestampInput {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl TimestampInput {
    /// Resolve to an instant the ledger can store and read back.
    pub fn resolve(&self) -> AppResult<DateTime<Utc>> {
        let parsed = match self {
            TimestampInput::Millis(ms) => from_millis(*ms),
            TimestampInput::FractionalMillis(ms) => from_float_millis(*ms),
            TimestampInput::Text(s) => parse_timestamp(s),
        };
        parsed.filter(is_storable).ok_or_else(|| {
            AppError::InvalidTimestamp(match self {
                TimestampInput::Millis(ms) => ms.to_string(),
                TimestampInput::FractionalMillis(ms) => ms.to_string(),
                TimestampInput::Text(s) => s.clone(),
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct CheckinRequest {
    pub operator_id: String,
    pub timestamp: Option<TimestampInput>,
}

#[derive(Debug, Clone)]
pub struct CheckinOutcome {
    pub record: AttendanceView,
    /// Set when this check-in completed the line's roster for the day.
    pub completion: Option<RosterComplete>,
}

/// True when `ts` comes less than `cooldown` after `last`.
/// A `ts` earlier than `last` counts as too soon.
pub fn within_cooldown(last: &DateTime<Utc>, ts: &DateTime<Utc>, cooldown: Duration) -> bool {
    *ts - *last < cooldown
}

/// Dedup gate and append for kiosk check-ins.
///
/// The latest-record lookup and the append are separate store calls: two
/// concurrent check-ins of the same operator may both be accepted.
pub struct CheckinLogic {
    cooldown: Duration,
}

impl CheckinLogic {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    /// `received_at` is used when the request carries no timestamp.
    pub fn apply(
        &self,
        repo: &LineRepository,
        req: &CheckinRequest,
        received_at: DateTime<Utc>,
    ) -> AppResult<CheckinOutcome> {
        let operator_id = req.operator_id.trim();
        if operator_id.is_empty() {
            return Err(AppError::Validation("Operator ID is required".into()));
        }

        let timestamp = match &req.timestamp {
            Some(input) => input.resolve()?,
            None => received_at,
        };
        let day = timestamp.date_naive();

        if let Some(last) = repo.latest_for(operator_id, &day)?
            && within_cooldown(&last.timestamp, &timestamp, self.cooldown)
        {
            repo.audit(
                "checkin_rejected",
                &format!(
                    "{} at {} (last {})",
                    operator_id,
                    format_timestamp(&timestamp),
                    last.timestamp_str()
                ),
            );
            return Err(AppError::DuplicateCheckIn {
                minutes: self.cooldown.num_minutes(),
            });
        }

        let stored = repo.append(&NewRecord::present(operator_id, timestamp))?;
        tracing::info!(
            line = repo.line(),
            operator_id,
            timestamp = %stored.timestamp_str(),
            "check-in accepted"
        );
        repo.audit(
            "checkin",
            &format!("{} at {}", operator_id, stored.timestamp_str()),
        );

        let completion = completion::evaluate(repo, &day)?;
        let record = stored.view(repo.operator(operator_id)?.as_ref());

        Ok(CheckinOutcome { record, completion })
    }
}
