use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Confirms the API server is running.
pub async fn ping(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "app": state.config.common.app_name }))
}
