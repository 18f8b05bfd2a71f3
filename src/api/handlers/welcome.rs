//! Handler for the root endpoint.

use axum::{Json, http::header, response::IntoResponse};

use crate::api::dto::welcome::WelcomeResponse;

pub const WELCOME_MESSAGE: &str = "🧑🏽‍💻 Welcome to URL shortener";

/// Returns a fixed welcome message.
///
/// # Endpoint
///
/// `GET /`
///
/// The response is marked non-cacheable for browsers and intermediaries.
pub async fn welcome_handler() -> impl IntoResponse {
    (
        [
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, proxy-revalidate",
            ),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(WelcomeResponse {
            message: WELCOME_MESSAGE.to_string(),
        }),
    )
}
