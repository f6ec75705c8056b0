// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::period_bounds;
use chrono::NaiveDate;

/// Parse `--range` into inclusive day bounds.
///
/// Accepted:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return period_bounds(r);
    };

    let start = start_raw.trim();
    let end = end_raw.trim();

    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "{r}: start and end must have the same format"
        )));
    }

    let (from, _) = period_bounds(start)?;
    let (_, to) = period_bounds(end)?;

    if from > to {
        return Err(AppError::InvalidDate(format!("{r}: start is after end")));
    }

    Ok((from, to))
}
