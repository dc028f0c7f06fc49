use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::{debug, warn};

use super::error_responses::ErrorResponse;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Fallback for any route the router does not know; same body shape as the
/// subscription errors.
pub async fn not_found() -> impl IntoResponse {
    warn!(status = 404, "subscriptions api: no route matched");

    let status = StatusCode::NOT_FOUND;
    let body = ErrorResponse {
        code: status.as_u16(),
        message: "resource not found".to_string(),
        errors: Vec::new(),
    };

    (status, Json(body))
}

pub async fn health_check() -> impl IntoResponse {
    debug!("subscriptions api: health check");
    (StatusCode::OK, Json(HealthResponse { status: "OK" }))
}
