//! Line identifier → repository bound to that line.

use crate::db::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, AttendanceView, NewRecord, Operator};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The store seen through one production line.
#[derive(Clone)]
pub struct LineRepository {
    line: Arc<str>,
    store: Arc<dyn AttendanceStore>,
}

impl LineRepository {
    pub fn new(line: &str, store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            line: Arc::from(line),
            store,
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn operator(&self, id: &str) -> AppResult<Option<Operator>> {
        self.store.find_operator(&self.line, id)
    }

    pub fn roster(&self) -> AppResult<Vec<Operator>> {
        self.store.list_operators(&self.line)
    }

    pub fn add_operator(&self, operator: &Operator) -> AppResult<()> {
        self.store.insert_operator(&self.line, operator)
    }

    pub fn remove_operator(&self, id: &str) -> AppResult<()> {
        if self.store.delete_operator(&self.line, id)? {
            Ok(())
        } else {
            Err(AppError::OperatorNotFound(id.to_string()))
        }
    }

    pub fn latest_for(&self, operator_id: &str, day: &NaiveDate) -> AppResult<Option<AttendanceRecord>> {
        self.store.latest_for_operator(&self.line, operator_id, day)
    }

    pub fn records_on(&self, day: &NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        self.store.records_on(&self.line, day)
    }

    pub fn records_with_prefix(&self, prefix: &str) -> AppResult<Vec<AttendanceRecord>> {
        self.store.records_with_prefix(&self.line, prefix)
    }

    pub fn records_between(&self, from: &NaiveDate, to: &NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
        self.store.records_between(&self.line, from, to)
    }

    pub fn append(&self, record: &NewRecord) -> AppResult<AttendanceRecord> {
        self.store.append(&self.line, record)
    }

    /// Audit entries are best effort.
    pub fn audit(&self, operation: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, &self.line, message) {
            tracing::warn!(line = %self.line, operation, error = %e, "failed to write internal log");
        }
    }

    /// Join records with the current roster. Operators missing from the
    /// roster get the sentinel display fields.
    pub fn join(&self, records: &[AttendanceRecord]) -> AppResult<Vec<AttendanceView>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let roster: HashMap<String, Operator> = self
            .roster()?
            .into_iter()
            .map(|o| (o.id.clone(), o))
            .collect();

        Ok(records
            .iter()
            .map(|r| r.view(roster.get(&r.operator_id)))
            .collect())
    }
}

/// Built once at startup from the configured lines.
pub struct LineRegistry {
    lines: BTreeMap<String, LineRepository>,
}

impl LineRegistry {
    pub fn new(lines: &[String], store: Arc<dyn AttendanceStore>) -> Self {
        let lines = lines
            .iter()
            .map(|l| (l.clone(), LineRepository::new(l, store.clone())))
            .collect();
        Self { lines }
    }

    pub fn get(&self, line: &str) -> AppResult<&LineRepository> {
        self.lines
            .get(line)
            .ok_or_else(|| AppError::UnknownLine(line.to_string()))
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }
}
