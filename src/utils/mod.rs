//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Time-derived base-62 short codes

pub mod code_generator;
