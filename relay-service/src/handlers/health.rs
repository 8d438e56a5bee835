use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe; the process is up even when the broker is not.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let broker = if state.broker_connected() {
        "connected"
    } else {
        "disconnected"
    };

    Json(json!({
        "status": "ok",
        "service": "relay-service",
        "version": env!("CARGO_PKG_VERSION"),
        "broker": broker
    }))
}

/// Readiness probe: ready only while the broker session is open.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.broker_connected() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
