//! Error types for the playback core

use crate::types::ChannelKind;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No stories loaded
    #[error("No stories loaded")]
    NoStories,

    /// Navigation target out of bounds (go_to never wraps)
    #[error("Story index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// A media resource failed to load or decode
    #[error("Media load failed on {channel:?} channel: {reason}")]
    MediaLoadFailed {
        channel: ChannelKind,
        reason: String,
    },

    /// The platform refused to start playback (autoplay policy)
    #[error("Playback start rejected: {0}")]
    PlaybackStartRejected(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
