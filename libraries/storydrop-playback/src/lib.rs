//! Storydrop Playback - Platform-agnostic story playback engine
//!
//! Drives the two-channel audio model behind the story feed: a narration
//! track over a looping, ducked music bed, with a scripted ending
//! choreography (swell, hold, fade, silence, chime) that auto-advances to
//! the next story.
//!
//! The engine owns no platform audio itself. Hosts supply three
//! [`MediaElement`] implementations (narration, music, chime) and pump
//! the controller from their own clock:
//!
//! - [`PlaybackController::handle_media_event`] for element callbacks
//! - [`PlaybackController::tick`] on the frame/caption cadence
//! - [`PlaybackController::drain_events`] to collect UI updates
//!
//! All timing is driven by the `Instant` passed into `tick`, so the whole
//! choreography is testable against a stepped clock.

mod channel;
mod controller;
mod error;
mod events;
mod fade;
mod gesture;
mod media;
mod scheduler;
mod types;
mod ui;

// Re-export public API
pub use channel::{AudioChannel, LoadState};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::{PlayIndicator, PlayerCommand, PlayerEvent};
pub use gesture::{Gesture, GestureRouter, GestureTarget, SWIPE_THRESHOLD, TAP_DEAD_ZONE};
pub use media::{MediaElement, MediaEvent};
pub use scheduler::{TransitionAction, TransitionScheduler, TransitionStage};
pub use types::{ChannelKind, PlaybackPhase, PlayerConfig, TransitionTiming};
pub use ui::{
    caption_scroll_offset, format_time, CaptionViewport, MediaArtwork, MediaSessionState,
    UiSnapshot, TIME_PLACEHOLDER,
};
