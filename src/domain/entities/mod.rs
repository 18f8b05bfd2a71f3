//! Core domain entities representing the business data model.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewLink`] carries what the caller supplies, [`Link`] is what the store
//! hands back.

pub mod link;

pub use link::{Link, NewLink, default_expiry};
