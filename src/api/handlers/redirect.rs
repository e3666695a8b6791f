//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Path segments that belong to the transport layer, never to short codes.
pub const RESERVED_PATHS: &[&str] = &["favicon.ico", "metrics", "health", "shorten"];

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Reserved paths answer 404 without touching the store.
///
/// # Errors
///
/// - 404 if the code is reserved or unknown
/// - 503 if the store is unavailable
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if code.is_empty() || RESERVED_PATHS.contains(&code.as_str()) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let long_url = state.resolve_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
}
