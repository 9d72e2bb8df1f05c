use thiserror::Error;

/// Errors that can occur during artwork URL resolution
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// Media base URL could not be parsed
    #[error("Invalid media base URL: {0}")]
    InvalidBaseUrl(String),

    /// Image reference could not be resolved against the base
    #[error("Invalid image reference: {0}")]
    InvalidReference(String),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
