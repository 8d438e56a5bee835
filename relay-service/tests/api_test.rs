mod common;

use common::TestApp;
use reqwest::{Client, Method, StatusCode};
use service_core::broker::MockPublisher;
use std::sync::Arc;

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_check_works_without_broker() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "relay-service");
    assert_eq!(body["broker"], "disconnected");
}

#[tokio::test]
async fn not_ready_without_broker() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(app.url("/ready"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ready_with_connected_publisher() {
    let app = TestApp::spawn_with_publisher(Arc::new(MockPublisher::new(true))).await;

    let response = Client::new()
        .get(app.url("/ready"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Ping + CORS
// =============================================================================

#[tokio::test]
async fn ping_reports_app_name_with_cors_headers() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(app.url("/api/ping"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "*");
    assert_eq!(headers["access-control-allow-headers"], "*");
    assert_eq!(headers["content-type"], "application/json");

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, serde_json::json!({ "app": "wicwug" }));
}

#[tokio::test]
async fn options_preflight_is_answered_without_publishing() {
    let publisher = Arc::new(MockPublisher::new(true));
    let app = TestApp::spawn_with_publisher(publisher.clone()).await;

    let response = Client::new()
        .request(Method::OPTIONS, app.url("/api/rabbit/test"))
        .header("Origin", "http://localhost:4200")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(publisher.publish_count(), 0);
}

// =============================================================================
// Broker publish
// =============================================================================

#[tokio::test]
async fn publish_without_broker_is_bad_gateway() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .post(app.url("/api/rabbit/test"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn publish_sends_hello_world() {
    let publisher = Arc::new(MockPublisher::new(true));
    let app = TestApp::spawn_with_publisher(publisher.clone()).await;

    let response = Client::new()
        .post(app.url("/api/rabbit/test"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["queue"], "TestQueue1");
    assert_eq!(body["status"], "published");

    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "TestQueue1");
    assert_eq!(published[0].1.body, br#"{"msg":"Hello world"}"#);
}

#[tokio::test]
async fn rejected_publish_is_bad_gateway() {
    let app = TestApp::spawn_with_publisher(Arc::new(MockPublisher::new(false))).await;

    let response = Client::new()
        .post(app.url("/api/rabbit/test"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn publish_endpoint_only_accepts_post() {
    let app = TestApp::spawn_with_publisher(Arc::new(MockPublisher::new(true))).await;

    let response = Client::new()
        .get(app.url("/api/rabbit/test"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
