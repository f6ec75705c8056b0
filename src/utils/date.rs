//! Calendar-day helpers. Attendance days are UTC dates.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    if s.len() != 10 {
        return Err(AppError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

fn prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}(-(0[1-9]|1[0-2])(-(0[1-9]|[12]\d|3[01]))?)?$")
            .expect("date prefix pattern is valid")
    })
}

/// Validate a day prefix used for listing: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn validate_date_prefix(prefix: &str) -> AppResult<&str> {
    let prefix = prefix.trim();
    if !prefix_regex().is_match(prefix) {
        return Err(AppError::InvalidDate(prefix.to_string()));
    }
    if prefix.len() == 10 {
        parse_date(prefix)?;
    }
    Ok(prefix)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// First and last day covered by a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = validate_date_prefix(p)?;
    let bad = || AppError::InvalidDate(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| bad())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(bad)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(bad)?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").map_err(|_| bad())?;
            let last = last_day_of_month(first.year(), first.month()).ok_or_else(bad)?;
            Ok((first, last))
        }
        _ => {
            let d = parse_date(p)?;
            Ok((d, d))
        }
    }
}
