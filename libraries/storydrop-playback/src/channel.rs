//! Audio channel wrapper
//!
//! Thin state layer over one platform [`MediaElement`]: load readiness
//! tracking, stop semantics, and the channel's single in-flight fade ramp.
//! At most one fade runs per channel; starting a new one cancels the old.

use crate::error::Result;
use crate::fade::FadeRamp;
use crate::media::{MediaElement, MediaEvent};
use crate::types::ChannelKind;
use std::time::{Duration, Instant};

/// Load state of the channel's current source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No source attached
    Idle,

    /// Source set, platform has not reported readiness yet
    Loading,

    /// Resource can play through without stalling
    Ready,

    /// Resource failed to load or decode
    Failed,
}

/// One of the player's audio channels (narration, music, or chime)
pub struct AudioChannel {
    kind: ChannelKind,
    element: Box<dyn MediaElement>,
    load: LoadState,
    fade: Option<FadeRamp>,
    default_volume: f32,
    looping: bool,
}

impl AudioChannel {
    /// Wrap a platform element as a channel.
    ///
    /// `default_volume` is the clean-baseline volume restored by
    /// [`stop`](Self::stop) and [`reset`](Self::reset); `looping` is
    /// applied to every source this channel loads.
    pub fn new(
        kind: ChannelKind,
        mut element: Box<dyn MediaElement>,
        default_volume: f32,
        looping: bool,
    ) -> Self {
        element.set_volume(default_volume);
        element.set_looping(looping);
        Self {
            kind,
            element,
            load: LoadState::Idle,
            fade: None,
            default_volume,
            looping,
        }
    }

    /// Which channel this is.
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Begin loading a new source.
    ///
    /// Readiness arrives later via [`handle_event`](Self::handle_event).
    pub fn load(&mut self, url: &str) {
        self.fade = None;
        self.element.pause();
        self.element.set_source(url);
        self.element.set_looping(self.looping);
        self.load = LoadState::Loading;
    }

    /// Start playback of the loaded source.
    pub fn play(&mut self) -> Result<()> {
        self.element.play()
    }

    /// Pause, preserving position (used for resume).
    pub fn pause(&mut self) {
        self.element.pause();
    }

    /// Seek to an absolute position.
    pub fn seek(&mut self, position: Duration) {
        self.element.seek(position);
    }

    /// Set volume directly, cancelling any in-flight fade.
    pub fn set_volume(&mut self, volume: f32) {
        self.fade = None;
        self.element.set_volume(volume.clamp(0.0, 1.0));
    }

    /// Current volume.
    pub fn volume(&self) -> f32 {
        self.element.volume()
    }

    /// Pause, rewind, and restore the default volume, keeping the source.
    ///
    /// Used after the ending choreography's fade-out so the bed is clean
    /// for its next use.
    pub fn reset(&mut self) {
        self.fade = None;
        self.element.pause();
        self.element.seek(Duration::ZERO);
        self.element.set_volume(self.default_volume);
    }

    /// Full stop: [`reset`](Self::reset) plus detach the source.
    ///
    /// A story switch always stops both content channels before loading
    /// the next story, so no music is ever left playing across an index
    /// change.
    pub fn stop(&mut self) {
        self.reset();
        self.element.clear_source();
        self.load = LoadState::Idle;
    }

    /// Begin a fade from the current volume to `target` over `duration`.
    ///
    /// Cancels any in-flight fade on this channel.
    pub fn begin_fade(&mut self, target: f32, duration: Duration, now: Instant) {
        self.fade = Some(FadeRamp::new(self.element.volume(), target, duration, now));
    }

    /// Cancel the in-flight fade, leaving the volume where it is.
    pub fn cancel_fade(&mut self) {
        self.fade = None;
    }

    /// Whether a fade is currently running.
    pub fn fade_active(&self) -> bool {
        self.fade.is_some()
    }

    /// Advance the fade ramp. Returns true when the fade just completed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(ref mut fade) = self.fade else {
            return false;
        };

        if let Some(volume) = fade.tick(self.element.volume(), now) {
            let done = fade.is_complete();
            self.element.set_volume(volume);
            if done {
                self.fade = None;
            }
            return done;
        }
        false
    }

    /// Fold a platform event into the channel's load state.
    pub fn handle_event(&mut self, event: &MediaEvent) {
        match event {
            MediaEvent::Ready => {
                if self.load == LoadState::Loading {
                    self.load = LoadState::Ready;
                }
            }
            MediaEvent::LoadFailed { .. } => {
                self.load = LoadState::Failed;
            }
            _ => {}
        }
    }

    /// Current load state.
    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Whether the current source is ready to play.
    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    /// Current playback position.
    pub fn position(&self) -> Duration {
        self.element.position()
    }

    /// Duration of the current source, once known.
    pub fn duration(&self) -> Option<Duration> {
        self.element.duration()
    }
}
