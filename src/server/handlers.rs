//! Route handlers. Store calls run on the blocking pool.

use super::error::ApiResult;
use super::state::AppState;
use crate::core::report::ExportRow;
use crate::core::{CheckinRequest, DigestLogic, ReportLogic, TimestampInput};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceView, Operator};
use crate::utils::date::{parse_date, today_utc};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

async fn blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Server(format!("blocking task failed: {e}")))?
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub lines: Vec<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
        lines: state.registry.lines().map(str::to_string).collect(),
    })
}

pub async fn list_operators(
    State(state): State<AppState>,
    Path(line): Path<String>,
) -> ApiResult<Json<Vec<Operator>>> {
    let repo = state.registry.get(&line)?.clone();
    Ok(Json(blocking(move || repo.roster()).await?))
}

pub async fn get_attendance(
    State(state): State<AppState>,
    Path((line, date)): Path<(String, String)>,
) -> ApiResult<Json<Vec<AttendanceView>>> {
    let repo = state.registry.get(&line)?.clone();
    let views = blocking(move || ReportLogic::list_prefix(&repo, &date)).await?;
    Ok(Json(views))
}

/// Body extraction failures share the validation error shape.
fn rejection_to_validation(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinPayload {
    #[serde(default)]
    pub operator_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<TimestampInput>,
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    Path(line): Path<String>,
    payload: Result<Json<CheckinPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AttendanceView>)> {
    let received_at = Utc::now();
    let Json(payload) = payload.map_err(rejection_to_validation)?;
    let repo = state.registry.get(&line)?.clone();
    let logic = state.checkin.clone();

    let req = CheckinRequest {
        operator_id: payload.operator_id.unwrap_or_default(),
        timestamp: payload.timestamp,
    };

    let outcome = blocking(move || logic.apply(&repo, &req, received_at)).await?;

    if let Some(event) = outcome.completion {
        // Fire and forget: the response does not wait for the mail.
        let hook = state.hook.clone();
        tokio::task::spawn_blocking(move || hook.on_roster_complete(event));
    }

    Ok((StatusCode::CREATED, Json(outcome.record)))
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn export_attendance(
    State(state): State<AppState>,
    Path(line): Path<String>,
    Query(q): Query<RangeQuery>,
) -> ApiResult<Json<Vec<ExportRow>>> {
    let repo = state.registry.get(&line)?.clone();
    let rows = blocking(move || {
        ReportLogic::export_range_str(&repo, q.from.as_deref(), q.to.as_deref())
    })
    .await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct SendQuery {
    pub line: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub message: String,
    pub line: String,
    pub date: String,
    pub entries: usize,
}

pub async fn send_attendance_now(
    State(state): State<AppState>,
    Query(q): Query<SendQuery>,
) -> ApiResult<Json<SendResponse>> {
    let line = q
        .line
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Line query parameter is required".into()))?;
    let day = match q.date.as_deref() {
        Some(d) => parse_date(d)?,
        None => today_utc(),
    };

    let repo = state.registry.get(&line)?.clone();
    let notifier = state.notifier.clone();
    let entries = blocking(move || DigestLogic::send(&repo, &day, notifier.as_ref())).await?;

    Ok(Json(SendResponse {
        message: "Attendance email sent".to_string(),
        line,
        date: day.format("%Y-%m-%d").to_string(),
        entries,
    }))
}
