//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// Redirect target. Stored as given.
    pub url: String,

    /// When true, the link is deleted after its first redirect.
    pub single: Option<bool>,

    /// Expiry as Unix seconds. After this instant the link returns 410 Gone.
    pub expires: Option<i64>,
}

/// Response carrying the generated short code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub shortcode: String,
}
