use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "ping-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// No dependencies to wait on, so always ready once serving.
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}
