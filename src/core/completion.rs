use crate::core::registry::LineRepository;
use crate::errors::AppResult;
use crate::models::{AttendanceRecord, Operator};
use crate::notify::DigestEntry;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Every operator of a line has checked in on `day`.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterComplete {
    pub line: String,
    pub day: NaiveDate,
    /// The day's check-ins, joined with the roster.
    pub entries: Vec<DigestEntry>,
}

/// True when every roster operator has at least one record among
/// `records`, whatever its status. An empty roster is never complete.
pub fn is_roster_complete(roster: &[Operator], records: &[AttendanceRecord]) -> bool {
    if roster.is_empty() {
        return false;
    }
    let attended: HashSet<&str> = records.iter().map(|r| r.operator_id.as_str()).collect();
    roster.iter().all(|op| attended.contains(op.id.as_str()))
}

/// Recompute completion for `day` from the roster and the day's records.
pub fn evaluate(repo: &LineRepository, day: &NaiveDate) -> AppResult<Option<RosterComplete>> {
    let roster = repo.roster()?;
    let records = repo.records_on(day)?;

    if !is_roster_complete(&roster, &records) {
        return Ok(None);
    }

    let entries = repo
        .join(&records)?
        .iter()
        .map(DigestEntry::from)
        .collect();

    Ok(Some(RosterComplete {
        line: repo.line().to_string(),
        day: *day,
        entries,
    }))
}
