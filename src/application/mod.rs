//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers a small API
//! that already applies the link policy.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
