//! DTO for the root endpoint.

use serde::{Deserialize, Serialize};

/// Fixed greeting returned by `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
