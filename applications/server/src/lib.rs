//! Storydrop Server Library
//!
//! Companion server for the story player page: serves the static bundle
//! and injects runtime catalog configuration via `/env.js`.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{CatalogSettings, ServerConfig};
pub use error::{Result, ServerError};
pub use routes::build_router;
pub use state::AppState;
