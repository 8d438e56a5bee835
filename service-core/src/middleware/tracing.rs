use axum::{body::Body, http::Request};
use tracing::Span;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span for `TraceLayer::make_span_with`, tagged with the caller's request id when present.
pub fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}
