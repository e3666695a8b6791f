//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Result of a successful shorten request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
}
