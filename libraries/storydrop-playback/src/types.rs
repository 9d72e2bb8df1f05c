//! Core types for the playback state machine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback phase
///
/// Exactly one phase is active at a time. The `muted` master switch is
/// tracked separately and is orthogonal to the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Stories set, player not yet activated
    Idle,

    /// Catalog not yet delivered (pre-initialize)
    Loading,

    /// Music lead-in running, narration not yet started
    PlayingIntro,

    /// Narration playing (music ducked underneath if present)
    PlayingNarration,

    /// Paused mid-story (or loaded without autoplay)
    Paused,

    /// Narration finished, ending choreography in flight
    Ending,

    /// Story switch in flight (channels stopped, loads pending)
    Transitioning,
}

/// Which audio channel an event or command refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Primary spoken-word track
    Narration,

    /// Looping background music bed
    Music,

    /// Fire-and-forget transition chime
    Chime,
}

/// Timing contract for the ending choreography
///
/// All values are defaults and configurable; the scheduler never hardcodes
/// them. The default sequence totals 8800 ms before auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTiming {
    /// Music fade from low to high on narration end (default: 800 ms)
    pub swell: Duration,

    /// Hold at high volume, fade or not (default: 2000 ms)
    pub hold: Duration,

    /// Music fade from high to silence (default: 3000 ms)
    pub fade_out: Duration,

    /// Silence before the chime (default: 1000 ms)
    pub silence: Duration,

    /// Wait after the chime before advancing (default: 2000 ms)
    pub advance_delay: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            swell: Duration::from_millis(800),
            hold: Duration::from_millis(2000),
            fade_out: Duration::from_millis(3000),
            silence: Duration::from_millis(1000),
            advance_delay: Duration::from_millis(2000),
        }
    }
}

impl TransitionTiming {
    /// Total elapsed time from narration end to auto-advance.
    pub fn total(&self) -> Duration {
        self.swell + self.hold + self.fade_out + self.silence + self.advance_delay
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Music volume when no narration is speaking (default: 1.0)
    pub music_high_volume: f32,

    /// Ducked music volume under narration (default: 0.2)
    pub music_low_volume: f32,

    /// Transition chime volume (default: 0.7)
    pub chime_volume: f32,

    /// Music lead-in before narration on a fresh story (default: 2000 ms)
    pub music_lead_in: Duration,

    /// High-to-low duck fade once narration starts (default: 500 ms)
    pub duck_fade: Duration,

    /// Skip-forward/backward step (default: 10 s)
    pub skip_step: Duration,

    /// Caption auto-scroll recompute cadence (default: 50 ms)
    pub caption_tick: Duration,

    /// Ending choreography timings
    pub timing: TransitionTiming,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            music_high_volume: 1.0,
            music_low_volume: 0.2,
            chime_volume: 0.7,
            music_lead_in: Duration::from_millis(2000),
            duck_fade: Duration::from_millis(500),
            skip_step: Duration::from_secs(10),
            caption_tick: Duration::from_millis(50),
            timing: TransitionTiming::default(),
        }
    }
}
