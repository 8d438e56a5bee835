use crate::models::HelloMessage;
use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use service_core::broker::{BrokerError, OutboundMessage};
use service_core::error::AppError;

/// Publish a fixed hello-world JSON message onto the configured queue.
///
/// Any broker failure, including a missing session, answers 502.
pub async fn publish_test_message(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let queue = &state.config.broker.queue;

    let publisher = state.publisher.as_ref().ok_or_else(|| {
        tracing::error!(queue = %queue, "No broker session, cannot send message");
        AppError::Broker(BrokerError::NotConnected)
    })?;

    let message = OutboundMessage::json(&HelloMessage::default())?;

    publisher.publish(queue, message).await.map_err(|e| {
        tracing::error!(queue = %queue, error = %e, "Failed to send message to broker");
        AppError::from(e)
    })?;

    Ok(Json(json!({ "queue": queue, "status": "published" })))
}
