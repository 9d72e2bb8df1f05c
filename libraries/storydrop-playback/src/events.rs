//! Player events and commands
//!
//! Event-based communication for UI synchronization: the controller queues
//! events at every state change and the host drains them after each batch
//! of input. Commands are the single write surface — gestures, on-screen
//! buttons, and OS media-session controls all arrive as [`PlayerCommand`]s.

use crate::types::PlaybackPhase;
use serde::{Deserialize, Serialize};
use storydrop_core::StoryId;

/// Commands accepted by the playback controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Start or resume playback (OS media-session "play")
    Play,

    /// Pause playback (OS media-session "pause")
    Pause,

    /// Toggle play/pause (tap on the story surface)
    Toggle,

    /// Advance to the next story, preserving play state
    Next,

    /// Go back to the previous story, preserving play state
    Previous,

    /// Seek narration forward by the configured skip step
    SkipForward,

    /// Seek narration backward by the configured skip step
    SkipBackward,
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback phase changed
    PhaseChanged {
        /// The new phase
        phase: PlaybackPhase,
    },

    /// The current story changed (manual navigation or auto-advance)
    StoryChanged {
        /// Index of the new story in the feed
        index: usize,
        /// ID of the new story
        story_id: StoryId,
        /// ID of the previous story (if any)
        previous_story_id: Option<StoryId>,
    },

    /// Progress/time displays must drop to the unknown placeholder
    ///
    /// Emitted at the start of every story switch, before any load
    /// begins, so the UI never shows the previous story's duration.
    ProgressReset,

    /// Periodic narration position report
    PositionUpdate {
        /// Position in milliseconds
        position_ms: u64,
        /// Duration in milliseconds, once known
        duration_ms: Option<u64>,
    },

    /// The muted master switch changed
    MutedChanged {
        /// New muted state
        muted: bool,
    },

    /// Transient, auto-dismissing banner text
    Notice {
        /// Message to display
        message: String,
        /// Seconds before the banner dismisses itself
        dismiss_after_secs: u64,
    },

    /// A recoverable error occurred
    Error {
        /// Error message
        message: String,
    },
}

/// Renderable play/pause indicator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayIndicator {
    /// Show the play glyph
    Paused,

    /// Show the speaking/waveform glyph
    Playing,

    /// Show nothing (transition windows, avoids flicker)
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_for_the_ui_bridge() {
        let event = PlayerEvent::PositionUpdate {
            position_ms: 30_000,
            duration_ms: Some(120_000),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PlayerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
