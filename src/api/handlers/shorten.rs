//! Handler for link shortening endpoint.

use axum::{Json, body::Bytes, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /`
///
/// The body is parsed as JSON whatever its `Content-Type`.
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "single": true,          // optional, default false
///   "expires": 1767225600    // optional, Unix seconds
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "shortcode": "1P8vYkR3xQe" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body or an unrepresentable expiry.
/// Returns 409 Conflict if the generated code collides and 500 on storage
/// errors.
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    let payload: ShortenRequest = serde_json::from_slice(&body)?;

    let link = state
        .link_service
        .create_link(payload.url, payload.single, payload.expires)
        .await?;

    Ok(Json(ShortenResponse {
        shortcode: link.code,
    }))
}
