//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod sections;

pub use sections::{get_section, list_sections, not_found};
