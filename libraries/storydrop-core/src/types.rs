//! Story and show types

use serde::{Deserialize, Serialize};
use std::fmt;

/// How long a transient notice banner stays on screen, in seconds.
///
/// Shared by every producer of notices (catalog fallback, playback
/// errors) so banners dismiss on one consistent schedule.
pub const NOTICE_DISMISS_SECS: u64 = 5;

/// Story identifier
///
/// Opaque identifier assigned by the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Create a new story ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Show branding metadata attached to a story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Display name of the show
    pub name: String,

    /// Raw artwork reference (storage-relative or absolute)
    pub image_url: Option<String>,

    /// URL slug for the show
    pub slug: Option<String>,
}

/// A single narrated story
///
/// Immutable per playback session. `narration_audio_url` is required for
/// playability; the catalog filters out rows without one. `music_url` and
/// `script` are optional and their absence disables background-music
/// ducking and caption display respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Unique identifier from the catalog
    pub id: StoryId,

    /// Display title
    pub title: String,

    /// URI of the narration track
    pub narration_audio_url: String,

    /// Optional URI of the looping background music bed
    pub music_url: Option<String>,

    /// Optional plaintext caption script
    pub script: Option<String>,

    /// Show branding metadata
    pub show: Show,

    /// Display-only like count
    pub like_count: u32,
}

impl Story {
    /// Whether a background music bed is configured for this story
    pub fn has_music(&self) -> bool {
        self.music_url.is_some()
    }

    /// Whether caption text is available for display
    pub fn captions_available(&self) -> bool {
        self.script.as_deref().is_some_and(|s| !s.is_empty())
    }
}
