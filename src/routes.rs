//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`  - Allocate a short code for the request body
//! - `GET  /health`   - Storage health check
//! - `GET  /metrics`  - Prometheus exposition (404 when disabled)
//! - `GET  /{code}`   - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **HTTP metrics** - Request counter and latency histogram per route
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, metrics_handler, redirect_handler, shorten_handler};
use crate::api::middleware::{http_metrics, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and per-route middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(middleware::from_fn(http_metrics::layer))
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] wrapped in trailing-slash
/// normalization, which must run before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
