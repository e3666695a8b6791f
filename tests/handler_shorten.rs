mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use linkshortener::api::dto::shorten::ShortenResponse;
use linkshortener::api::handlers::shorten_handler;
use linkshortener::domain::NoopObserver;
use linkshortener::utils::code_generator::{HexCodeGenerator, is_well_formed};
use std::sync::Arc;

#[tokio::test]
async fn test_shorten_success() {
    let (state, repo) = common::create_test_state();
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.post("/shorten").text("https://example.com/a").await;

    response.assert_status_ok();

    let body = response.json::<ShortenResponse>();
    assert!(is_well_formed(&body.code, 6));
    assert_eq!(
        body.short_url,
        format!("{}/{}", common::TEST_BASE_URL, body.code)
    );

    let link = repo.snapshot().pop().unwrap();
    assert_eq!(link.code, body.code);
    assert_eq!(link.long_url, "https://example.com/a");
}

#[tokio::test]
async fn test_shorten_stores_body_verbatim() {
    let (state, repo) = common::create_test_state();
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    server
        .post("/shorten")
        .text("not even a url ")
        .await
        .assert_status_ok();

    assert_eq!(repo.snapshot()[0].long_url, "not even a url ");
}

#[tokio::test]
async fn test_shorten_empty_body() {
    let (state, repo) = common::create_test_state();
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.post("/shorten").text("").await;
    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_capacity_exhausted() {
    let (_, repo) = common::create_test_state();
    common::create_test_link(&repo, "abcabc", "https://existing.com").await;

    let state = common::create_state_with(
        repo.clone(),
        Arc::new(common::SequenceGenerator::new(&[
            "abcabc", "abcabc", "abcabc", "abcabc", "abcabc",
        ])),
        Arc::new(NoopObserver),
    );
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.post("/shorten").text("https://new.com").await;
    assert_eq!(response.status_code(), 500);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "capacity_exhausted");
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_store_unavailable() {
    let state = common::create_state_with(
        Arc::new(common::UnavailableRepository),
        Arc::new(HexCodeGenerator),
        Arc::new(NoopObserver),
    );
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.post("/shorten").text("https://example.com").await;

    // Default policy retries store errors until the attempt budget runs out.
    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "capacity_exhausted"
    );
}
