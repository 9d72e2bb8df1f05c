//! Platform seam for playable audio resources
//!
//! The playback core never touches a real decoder or output device.
//! Platforms implement [`MediaElement`] for whatever actually plays audio
//! (an HTML audio element, a native media player) and feed readiness and
//! progress back in as [`MediaEvent`]s.

use crate::error::Result;
use std::time::Duration;

/// One playable audio resource, as seen by the core.
///
/// Commands are synchronous; anything genuinely asynchronous on the
/// platform (loading, decode errors, completion) is reported back through
/// [`MediaEvent`] delivery into the controller.
pub trait MediaElement {
    /// Point the element at a new source URL and begin loading.
    ///
    /// The platform reports [`MediaEvent::Ready`] when the resource can
    /// play through without stalling, or [`MediaEvent::LoadFailed`] on a
    /// decode/network error.
    fn set_source(&mut self, url: &str);

    /// Detach the current source, if any.
    fn clear_source(&mut self);

    /// Start playback.
    ///
    /// Fails with [`crate::PlaybackError::PlaybackStartRejected`] when the
    /// platform blocks programmatic playback (autoplay policy).
    fn play(&mut self) -> Result<()>;

    /// Pause playback, preserving the position.
    fn pause(&mut self);

    /// Seek to an absolute position.
    fn seek(&mut self, position: Duration);

    /// Set the volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);

    /// Current volume in `[0.0, 1.0]`.
    fn volume(&self) -> f32;

    /// Loop the resource when it reaches the end.
    fn set_looping(&mut self, looping: bool);

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total duration, once known.
    fn duration(&self) -> Option<Duration>;
}

/// Events reported by a platform media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The resource can play through without stalling
    Ready,

    /// Playback started
    Started,

    /// Playback paused
    Paused,

    /// The resource played to its end
    Ended,

    /// Periodic position report
    TimeUpdate {
        position: Duration,
        duration: Option<Duration>,
    },

    /// The resource failed to load or decode
    LoadFailed { reason: String },
}
