//! Gesture classification
//!
//! Classifies pointer/touch input into swipe (navigate) vs tap (toggle).
//! Only the most recent gesture-start point is tracked; a gesture-end
//! with no matching start is a no-op, guarding against stray events.

/// Minimum horizontal distance for a swipe, in pixels
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Maximum horizontal distance for a tap, in pixels
pub const TAP_DEAD_ZONE: f32 = 10.0;

/// What the gesture-end event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTarget {
    /// The story surface itself
    Surface,

    /// A designated control region (buttons, progress scrubber)
    Control,
}

/// A classified gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Swipe left: advance to the next story
    NextStory,

    /// Swipe right: go back to the previous story
    PreviousStory,

    /// Tap on the surface: toggle play/pause
    TogglePlayPause,
}

/// Tracks one in-flight gesture and classifies it on release
#[derive(Debug, Default)]
pub struct GestureRouter {
    start_x: Option<f32>,
}

impl GestureRouter {
    /// Create a new router with no gesture in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a gesture-start position, replacing any previous one.
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Classify the gesture on release.
    ///
    /// Distances strictly between the dead zone and the swipe threshold
    /// are ambiguous and intentionally ignored. Taps on control regions
    /// are ignored here; the control handles its own click.
    pub fn end(&mut self, x: f32, target: GestureTarget) -> Option<Gesture> {
        let start_x = self.start_x.take()?;
        let delta_x = start_x - x;

        if delta_x.abs() >= SWIPE_THRESHOLD {
            if delta_x > 0.0 {
                Some(Gesture::NextStory)
            } else {
                Some(Gesture::PreviousStory)
            }
        } else if delta_x.abs() < TAP_DEAD_ZONE && target == GestureTarget::Surface {
            Some(Gesture::TogglePlayPause)
        } else {
            None
        }
    }
}
