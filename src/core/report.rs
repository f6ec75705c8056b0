//! Read side: day listings and range exports. Nothing here writes.

use crate::core::registry::LineRepository;
use crate::errors::{AppError, AppResult};
use crate::models::AttendanceView;
use crate::utils::date::{parse_date, validate_date_prefix};
use chrono::NaiveDate;
use serde::Serialize;

/// Flat export row, with the column headers used by spreadsheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Operator Name")]
    pub operator_name: String,
    #[serde(rename = "Employee ID")]
    pub employee_id: String,
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl From<&AttendanceView> for ExportRow {
    fn from(v: &AttendanceView) -> Self {
        Self {
            date: v.timestamp.clone(),
            operator_name: v.operator_name.clone(),
            employee_id: v.employee_id.clone(),
            station: v.station.clone(),
            status: v.status.to_string(),
        }
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Records whose day starts with `prefix` (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub fn list_prefix(repo: &LineRepository, prefix: &str) -> AppResult<Vec<AttendanceView>> {
        let prefix = validate_date_prefix(prefix)?;
        let records = repo.records_with_prefix(prefix)?;
        repo.join(&records)
    }

    pub fn list_day(repo: &LineRepository, day: &NaiveDate) -> AppResult<Vec<AttendanceView>> {
        let records = repo.records_on(day)?;
        repo.join(&records)
    }

    /// Every record of the line, oldest first.
    pub fn list_all(repo: &LineRepository) -> AppResult<Vec<AttendanceView>> {
        let records = repo.records_with_prefix("")?;
        repo.join(&records)
    }

    /// Records with `from <= day <= to`.
    pub fn export_range(
        repo: &LineRepository,
        from: &NaiveDate,
        to: &NaiveDate,
    ) -> AppResult<Vec<AttendanceView>> {
        if from > to {
            return Err(AppError::Validation(format!(
                "'from' ({from}) must not be after 'to' ({to})"
            )));
        }
        let records = repo.records_between(from, to)?;
        repo.join(&records)
    }

    /// Range export from raw query values; both ends are required.
    pub fn export_range_str(
        repo: &LineRepository,
        from: Option<&str>,
        to: Option<&str>,
    ) -> AppResult<Vec<ExportRow>> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(AppError::Validation("From and to dates are required".into()));
        };
        let from = parse_date(from)?;
        let to = parse_date(to)?;

        Ok(Self::export_range(repo, &from, &to)?
            .iter()
            .map(ExportRow::from)
            .collect())
    }
}
