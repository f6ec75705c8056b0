//! Persistence seam used by the attendance core.

use crate::db::log::write_log;
use crate::db::pool::SqliteStore;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{AttendanceRecord, NewRecord, Operator};
use chrono::NaiveDate;

/// Per-line collections of operators and attendance records.
///
/// Every call is scoped by `line`; implementations must keep lines isolated.
pub trait AttendanceStore: Send + Sync {
    fn find_operator(&self, line: &str, id: &str) -> AppResult<Option<Operator>>;

    fn list_operators(&self, line: &str) -> AppResult<Vec<Operator>>;

    fn insert_operator(&self, line: &str, operator: &Operator) -> AppResult<()>;

    fn delete_operator(&self, line: &str, id: &str) -> AppResult<bool>;

    /// Latest record of `operator_id` on `day`, by timestamp.
    fn latest_for_operator(
        &self,
        line: &str,
        operator_id: &str,
        day: &NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>>;

    fn records_on(&self, line: &str, day: &NaiveDate) -> AppResult<Vec<AttendanceRecord>>;

    fn records_with_prefix(&self, line: &str, prefix: &str) -> AppResult<Vec<AttendanceRecord>>;

    fn records_between(
        &self,
        line: &str,
        from: &NaiveDate,
        to: &NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>>;

    fn append(&self, line: &str, record: &NewRecord) -> AppResult<AttendanceRecord>;

    /// Internal audit trail.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}

impl AttendanceStore for SqliteStore {
    fn find_operator(&self, line: &str, id: &str) -> AppResult<Option<Operator>> {
        self.with_conn(|c| queries::find_operator(c, line, id))
    }

    fn list_operators(&self, line: &str) -> AppResult<Vec<Operator>> {
        self.with_conn(|c| queries::list_operators(c, line))
    }

    fn insert_operator(&self, line: &str, operator: &Operator) -> AppResult<()> {
        self.with_conn(|c| queries::insert_operator(c, line, operator))
    }

    fn delete_operator(&self, line: &str, id: &str) -> AppResult<bool> {
        self.with_conn(|c| queries::delete_operator(c, line, id))
    }

    fn latest_for_operator(
        &self,
        line: &str,
        operator_id: &str,
        day: &NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        self.with_conn(|c| queries::latest_for_operator(c, line, operator_id, day))
    }

    fn records_on(&self, line: &str, day: &NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        self.with_conn(|c| queries::records_on(c, line, day))
    }

    fn records_with_prefix(&self, line: &str, prefix: &str) -> AppResult<Vec<AttendanceRecord>> {
        self.with_conn(|c| queries::records_with_prefix(c, line, prefix))
    }

    fn records_between(
        &self,
        line: &str,
        from: &NaiveDate,
        to: &NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        self.with_conn(|c| queries::records_between(c, line, from, to))
    }

    fn append(&self, line: &str, record: &NewRecord) -> AppResult<AttendanceRecord> {
        self.with_conn(|c| queries::insert_record(c, line, record))
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.with_conn(|c| write_log(c, operation, target, message))
    }
}
