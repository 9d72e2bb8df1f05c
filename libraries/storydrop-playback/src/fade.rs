//! Stepped volume ramps
//!
//! Fades are a cancellable stepped ramp rather than a per-sample curve:
//! the platform element only exposes a scalar volume, so the ramp nudges
//! it once per step interval. The ramp terminates when the step count is
//! exhausted or the volume reaches/crosses the target, whichever comes
//! first, and snaps exactly to the target to avoid floating-point drift.

use std::time::{Duration, Instant};

/// Interval between ramp steps
pub const FADE_STEP_INTERVAL: Duration = Duration::from_millis(100);

/// A single in-flight volume ramp on one channel
#[derive(Debug, Clone)]
pub struct FadeRamp {
    target: f32,
    step: f32,
    steps_remaining: u32,
    next_step_at: Instant,
    complete: bool,
}

impl FadeRamp {
    /// Plan a ramp from `start` to `end` over `duration`, beginning at `now`.
    ///
    /// `steps = ceil(duration / step_interval)`, linear step size
    /// `(end - start) / steps`. A zero duration still takes one step.
    pub fn new(start: f32, end: f32, duration: Duration, now: Instant) -> Self {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);
        let steps = (duration.as_secs_f32() / FADE_STEP_INTERVAL.as_secs_f32())
            .ceil()
            .max(1.0) as u32;

        Self {
            target: end,
            step: (end - start) / steps as f32,
            steps_remaining: steps,
            next_step_at: now + FADE_STEP_INTERVAL,
            complete: false,
        }
    }

    /// Advance the ramp to `now`, applying every due step to `current`.
    ///
    /// Returns the new volume when at least one step fired, `None` when
    /// nothing was due. The final step always returns exactly the target.
    pub fn tick(&mut self, current: f32, now: Instant) -> Option<f32> {
        if self.complete {
            return None;
        }

        let mut volume = current;
        let mut stepped = false;

        while !self.complete && now >= self.next_step_at {
            volume = (volume + self.step).clamp(0.0, 1.0);
            self.steps_remaining -= 1;
            stepped = true;

            let crossed = if self.step >= 0.0 {
                volume >= self.target
            } else {
                volume <= self.target
            };

            if self.steps_remaining == 0 || crossed {
                // Snap to the exact target; no residual drift.
                volume = self.target;
                self.complete = true;
            } else {
                self.next_step_at += FADE_STEP_INTERVAL;
            }
        }

        stepped.then_some(volume)
    }

    /// Whether the ramp has reached its target.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The volume this ramp is heading for.
    pub fn target(&self) -> f32 {
        self.target
    }
}
