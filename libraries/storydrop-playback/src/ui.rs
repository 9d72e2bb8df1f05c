//! UI state projection
//!
//! One-way projection of playback state onto everything the page renders:
//! progress bar, time labels, play/pause indicator, captions scroll, and
//! the OS media-session mirror. Pure functions of current state, re-run
//! on every tick; nothing here feeds back into playback.

use crate::events::PlayIndicator;
use crate::types::PlaybackPhase;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder shown while a duration is unknown
pub const TIME_PLACEHOLDER: &str = "-:--";

/// Format a duration as `M:SS`.
pub fn format_time(value: Duration) -> String {
    let secs = value.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Captions pane geometry, supplied by the host on each projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionViewport {
    /// Total rendered height of the caption text
    pub content_height: f32,

    /// Visible height of the captions pane
    pub viewport_height: f32,
}

/// Target scroll offset keeping the current line mid-viewport.
///
/// `progress * content_height - viewport_height / 2`, clamped to the
/// scrollable range.
pub fn caption_scroll_offset(
    position: Duration,
    duration: Duration,
    viewport: CaptionViewport,
) -> f32 {
    if duration.is_zero() {
        return 0.0;
    }
    let progress = (position.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0);
    let max_scroll = (viewport.content_height - viewport.viewport_height).max(0.0);
    (progress * viewport.content_height - viewport.viewport_height / 2.0).clamp(0.0, max_scroll)
}

/// Everything the page redraws from playback state
#[derive(Debug, Clone, PartialEq)]
pub struct UiSnapshot {
    /// Progress bar fill percentage, only when the duration is known
    pub progress_percent: Option<f32>,

    /// Elapsed time label (`M:SS`)
    pub elapsed: String,

    /// Total time label (`M:SS`, or the placeholder while unknown)
    pub total: String,

    /// Play/pause indicator state
    pub indicator: PlayIndicator,

    /// Captions scroll offset, when captions are visible
    pub caption_scroll: Option<f32>,
}

impl UiSnapshot {
    /// Project playback state into renderable form.
    pub fn project(
        phase: PlaybackPhase,
        position: Duration,
        duration: Option<Duration>,
        captions: Option<CaptionViewport>,
    ) -> Self {
        let progress_percent = duration.filter(|d| !d.is_zero()).map(|d| {
            (position.as_secs_f32() / d.as_secs_f32()).clamp(0.0, 1.0) * 100.0
        });

        let indicator = match phase {
            PlaybackPhase::Paused => PlayIndicator::Paused,
            PlaybackPhase::PlayingIntro | PlaybackPhase::PlayingNarration => PlayIndicator::Playing,
            PlaybackPhase::Idle
            | PlaybackPhase::Loading
            | PlaybackPhase::Ending
            | PlaybackPhase::Transitioning => PlayIndicator::Hidden,
        };

        let caption_scroll = match (captions, duration) {
            (Some(viewport), Some(d)) if !d.is_zero() => {
                Some(caption_scroll_offset(position, d, viewport))
            }
            _ => None,
        };

        Self {
            progress_percent,
            elapsed: format_time(position),
            total: duration.map_or_else(|| TIME_PLACEHOLDER.to_string(), format_time),
            indicator,
            caption_scroll,
        }
    }
}

/// Artwork entry for the media-session mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaArtwork {
    /// Fully qualified artwork URL
    pub src: String,

    /// Advertised pixel dimensions, e.g. `192x192`
    pub sizes: String,
}

/// OS media-session mirror (lock-screen metadata and scrubber state)
///
/// Published whenever position or duration changes meaningfully. This is
/// a side-effecting projection with no feedback into playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSessionState {
    /// Story title
    pub title: String,

    /// Artist line (`Storydrop - {show name}`)
    pub artist: String,

    /// Album line (show name)
    pub album: String,

    /// Lock-screen artwork in ascending sizes
    pub artwork: Vec<MediaArtwork>,

    /// Narration duration in milliseconds, once known
    pub duration_ms: Option<u64>,

    /// Narration position in milliseconds, clamped to the duration
    pub position_ms: u64,

    /// 1.0 while narration plays, 0.0 otherwise
    pub playback_rate: f32,
}
