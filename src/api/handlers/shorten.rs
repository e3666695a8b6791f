//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::ShortenResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Stores the request body as a long URL and returns its short code.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// The raw body is the URL; it is stored as-is without parsing.
///
/// # Response
///
/// ```json
/// {
///   "code": "3fa9c1",
///   "short_url": "http://localhost:8080/3fa9c1"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is empty
/// - 500 if no unique code could be allocated
/// - 503 if the store is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ShortenResponse>, AppError> {
    let code = state.shorten_service.shorten(&body).await?;
    let short_url = state.short_url(&code);

    Ok(Json(ShortenResponse { code, short_url }))
}
