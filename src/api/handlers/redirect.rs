//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /short/{code}`
///
/// # Responses
///
/// - **302 Found** with `Location` set to the stored URL
/// - **404 Not Found** if the code is unknown or the lookup failed
/// - **410 Gone** if the link has expired; the record is deleted first
/// - **500 Internal Server Error** if the stored URL is not a valid
///   `Location` header value; a single-use link is left in place
///
/// # Single-use links
///
/// The deletion is spawned after the redirect response has been built, so a
/// failed delete never changes what the client receives. Two concurrent
/// requests may both be redirected before the delete lands.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&code, Utc::now()).await?;

    let location = HeaderValue::from_str(&link.url).map_err(|_| {
        tracing::error!(code = %code, "Stored URL is not a valid Location header");
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "code": code }),
        )
    })?;

    let response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();

    if link.single_use {
        let link_service = state.link_service.clone();
        tokio::spawn(async move {
            link_service.consume(&code).await;
        });
    }

    Ok(response)
}
