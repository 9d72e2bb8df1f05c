//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when fetching the story catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog endpoint returned an error response
    #[error("Catalog error ({status}): {message}")]
    CatalogError { status: u16, message: String },

    /// No credentials configured for the remote catalog
    #[error("Catalog credentials missing")]
    MissingCredentials,

    /// Catalog base URL is invalid
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a catalog response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Catalog returned no playable stories
    #[error("Catalog returned no stories")]
    Empty,

    /// Story not found (script fetch)
    #[error("Story not found: {0}")]
    StoryNotFound(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
