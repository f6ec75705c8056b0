//! HTTP mapping of [`AppError`].

use crate::errors::AppError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::UnknownLine(_) | AppError::OperatorNotFound(_) => StatusCode::NOT_FOUND,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Short, caller-facing summary for each family of errors.
fn message_for(err: &AppError) -> String {
    match err {
        AppError::Validation(m) => m.clone(),
        AppError::InvalidTimestamp(_) => "Invalid timestamp provided".to_string(),
        AppError::InvalidDate(_) => "Invalid date provided".to_string(),
        AppError::DuplicateCheckIn { .. } | AppError::UnknownLine(_) => err.to_string(),
        AppError::Mail(_) => "Failed to send attendance email".to_string(),
        _ if status_for(err).is_server_error() => "Internal Server Error".to_string(),
        _ => err.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = ErrorResponse {
            message: message_for(&self),
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, AppError>;
