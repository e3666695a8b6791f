mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use linkshortener::api::handlers::redirect_handler;
use linkshortener::utils::code_generator::HexCodeGenerator;
use std::sync::Arc;

#[tokio::test]
async fn test_redirect_success() {
    let (state, repo) = common::create_test_state();
    common::create_test_link(&repo, "a1b2c3", "https://example.com/target").await;

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/a1b2c3").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repo) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/zzzzzz").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_redirect_counts_resolutions() {
    let (_, repo) = common::create_test_state();
    common::create_test_link(&repo, "c0ffee", "https://example.com").await;

    let observer = Arc::new(common::CountingObserver::default());
    let state = common::create_state_with(repo, Arc::new(HexCodeGenerator), observer.clone());
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    server.get("/c0ffee").await;
    server.get("/c0ffee").await;
    server.get("/missing").await;

    assert_eq!(observer.resolved(), 2);
}

#[tokio::test]
async fn test_redirect_reserved_path_skips_store() {
    let observer = Arc::new(common::CountingObserver::default());
    let state = common::create_state_with(
        Arc::new(common::UnavailableRepository),
        Arc::new(HexCodeGenerator),
        observer.clone(),
    );
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    // The unavailable store would answer 503 if it were consulted.
    server.get("/favicon.ico").await.assert_status_not_found();
    server.get("/metrics").await.assert_status_not_found();
    assert_eq!(observer.resolved(), 0);
}

#[tokio::test]
async fn test_redirect_store_unavailable() {
    let state = common::create_state_with(
        Arc::new(common::UnavailableRepository),
        Arc::new(HexCodeGenerator),
        Arc::new(linkshortener::domain::NoopObserver),
    );
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/a1b2c3").await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "store_unavailable"
    );
}
