//! Unified application error type.
//! All modules (db, core, notify, server, cli) return AppError to keep the
//! error handling consistent and easy to map to exit codes and HTTP statuses.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp provided: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Attendance logic
    // ---------------------------
    #[error("Attendance already marked for this operator within the last {minutes} minutes")]
    DuplicateCheckIn { minutes: i64 },

    #[error("Unknown line: {0}")]
    UnknownLine(String),

    #[error("Operator {0} already exists")]
    OperatorExists(String),

    #[error("Operator {0} not found")]
    OperatorNotFound(String),

    // ---------------------------
    // Notification
    // ---------------------------
    #[error("Mail error: {0}")]
    Mail(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Server
    // ---------------------------
    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// True for errors caused by the caller's input rather than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidDate(_)
                | AppError::InvalidTimestamp(_)
                | AppError::InvalidTime(_)
                | AppError::DuplicateCheckIn { .. }
                | AppError::OperatorExists(_)
        )
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
