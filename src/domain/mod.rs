//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`expiration_sweeper`] - Periodic removal of expired links
//!
//! # Link Lifecycle
//!
//! 1. Created by `POST /` with a time-derived short code
//! 2. Resolved by `GET /short/{code}` while `now < expires_at`
//! 3. Removed when found expired on resolution, right after a single-use
//!    redirect, or by the periodic [`expiration_sweeper::ExpirationSweeper`]

pub mod entities;
pub mod expiration_sweeper;
pub mod repositories;
