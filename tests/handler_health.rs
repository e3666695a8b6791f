mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use linkshortener::api::handlers::health_handler;
use linkshortener::domain::NoopObserver;
use linkshortener::utils::code_generator::HexCodeGenerator;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repo) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let state = common::create_state_with(
        Arc::new(common::UnavailableRepository),
        Arc::new(HexCodeGenerator),
        Arc::new(NoopObserver),
    );
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
    assert!(json["checks"]["storage"]["message"].is_string());
}
