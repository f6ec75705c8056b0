//! API Router configuration

use super::handlers;
use super::state::AppState;
use crate::errors::{AppError, AppResult};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors_layer(origin: Option<&str>) -> AppResult<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        Some(o) => {
            let value = HeaderValue::from_str(o)
                .map_err(|e| AppError::Config(format!("invalid CORS origin '{o}': {e}")))?;
            Ok(layer.allow_origin(value))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

/// Create the main API router
pub fn create_router(state: AppState, cors_origin: Option<&str>) -> AppResult<Router> {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Roster
        .route("/operators/:line", get(handlers::list_operators))
        // Attendance
        .route("/attendance/send-attendance", post(handlers::send_attendance_now))
        .route("/attendance/export/:line", get(handlers::export_attendance))
        .route("/attendance/:line", post(handlers::mark_attendance))
        .route("/attendance/:line/:date", get(handlers::get_attendance));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin)?)
        .with_state(state))
}
