//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, welcome_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes.
///
/// # Endpoints
///
/// - `GET  /`             - Welcome message
/// - `POST /`             - Create a short link
/// - `GET  /short/{code}` - Redirect to the stored URL
/// - `GET  /health`       - Link store health
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome_handler).post(shorten_handler))
        .route("/short/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
}
