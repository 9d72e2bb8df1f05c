//! Ending choreography state machine
//!
//! Sequences the multi-step "story ended" choreography: music swell, hold
//! at full volume, fade to silence, a beat of quiet, the transition chime,
//! and finally the auto-advance. All steps are deadline-driven against
//! injected time; a single [`cancel`](TransitionScheduler::cancel) clears
//! everything, and a cancelled scheduler holds no state — only a fresh
//! narration-ended event starts a new sequence.
//!
//! The stage durations elapse whether or not a music bed is present; the
//! fade actions are simply skipped without one, keeping the advance timing
//! identical across stories.

use crate::types::TransitionTiming;
use std::time::{Duration, Instant};

/// Named stages of the ending choreography
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStage {
    /// Music fading from low to high
    MusicSwelling,

    /// Holding at high volume
    HoldingAtFull,

    /// Music fading from high to silence
    FadingOut,

    /// Quiet beat before the chime
    SilentPause,

    /// Chime fired from position zero
    ChimePlaying,

    /// Waiting out the final delay before advancing
    AdvanceDelay,
}

/// Actions the controller must perform at stage boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    /// Fade music from its current (low) volume to high
    SwellMusic { duration: Duration },

    /// Fade music from high to silence
    FadeOutMusic { duration: Duration },

    /// Pause music and reset its position/volume for next use
    ParkMusic,

    /// Play the transition chime from position zero (fire-and-forget)
    PlayChime,

    /// Invoke `next(autoplay = true)`
    Advance,
}

/// The ending choreography scheduler
///
/// Cancellation-safe: between [`cancel`](Self::cancel) and the next
/// [`start`](Self::start) no deadline exists and [`poll`](Self::poll)
/// never yields an action.
#[derive(Debug)]
pub struct TransitionScheduler {
    timing: TransitionTiming,
    stage: Option<(TransitionStage, Instant)>,
    music_audible: bool,
}

impl TransitionScheduler {
    /// Create a scheduler with the given timing contract.
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            timing,
            stage: None,
            music_audible: false,
        }
    }

    /// Begin a fresh sequence at narration end.
    ///
    /// Returns the swell action to apply immediately when a music bed is
    /// audible. Restarting while active replaces the previous sequence.
    pub fn start(&mut self, now: Instant, music_audible: bool) -> Option<TransitionAction> {
        self.music_audible = music_audible;
        self.stage = Some((TransitionStage::MusicSwelling, now + self.timing.swell));
        music_audible.then_some(TransitionAction::SwellMusic {
            duration: self.timing.swell,
        })
    }

    /// Cancel the sequence and drop all pending deadlines.
    pub fn cancel(&mut self) {
        self.stage = None;
        self.music_audible = false;
    }

    /// Whether a sequence is in flight.
    pub fn is_active(&self) -> bool {
        self.stage.is_some()
    }

    /// Current stage, if a sequence is in flight.
    pub fn stage(&self) -> Option<TransitionStage> {
        self.stage.map(|(stage, _)| stage)
    }

    /// Advance past every deadline that has elapsed by `now`.
    ///
    /// Deadlines chain off each other rather than off `now`, so a coarse
    /// tick cannot stretch the choreography.
    pub fn poll(&mut self, now: Instant) -> Vec<TransitionAction> {
        let mut actions = Vec::new();

        while let Some((stage, deadline)) = self.stage {
            if now < deadline {
                break;
            }

            match stage {
                TransitionStage::MusicSwelling => {
                    self.stage = Some((TransitionStage::HoldingAtFull, deadline + self.timing.hold));
                }
                TransitionStage::HoldingAtFull => {
                    if self.music_audible {
                        actions.push(TransitionAction::FadeOutMusic {
                            duration: self.timing.fade_out,
                        });
                    }
                    self.stage =
                        Some((TransitionStage::FadingOut, deadline + self.timing.fade_out));
                }
                TransitionStage::FadingOut => {
                    if self.music_audible {
                        actions.push(TransitionAction::ParkMusic);
                    }
                    self.stage =
                        Some((TransitionStage::SilentPause, deadline + self.timing.silence));
                }
                TransitionStage::SilentPause => {
                    actions.push(TransitionAction::PlayChime);
                    // The chime is fire-and-forget; the stage exists only
                    // to name the moment before the advance delay begins.
                    self.stage = Some((TransitionStage::ChimePlaying, deadline));
                }
                TransitionStage::ChimePlaying => {
                    self.stage = Some((
                        TransitionStage::AdvanceDelay,
                        deadline + self.timing.advance_delay,
                    ));
                }
                TransitionStage::AdvanceDelay => {
                    actions.push(TransitionAction::Advance);
                    self.stage = None;
                    self.music_audible = false;
                }
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn full_timeline_with_music() {
        let mut scheduler = TransitionScheduler::new(TransitionTiming::default());
        let t0 = Instant::now();

        assert_eq!(
            scheduler.start(t0, true),
            Some(TransitionAction::SwellMusic { duration: ms(800) })
        );

        // Nothing due mid-swell.
        assert!(scheduler.poll(t0 + ms(500)).is_empty());
        assert_eq!(scheduler.stage(), Some(TransitionStage::MusicSwelling));

        // Swell done -> holding; no action at this boundary.
        assert!(scheduler.poll(t0 + ms(800)).is_empty());
        assert_eq!(scheduler.stage(), Some(TransitionStage::HoldingAtFull));

        // Hold done at 2800ms -> fade-out begins.
        assert_eq!(
            scheduler.poll(t0 + ms(2800)),
            vec![TransitionAction::FadeOutMusic { duration: ms(3000) }]
        );

        // Fade-out done at 5800ms -> music parked, silence begins.
        assert_eq!(
            scheduler.poll(t0 + ms(5800)),
            vec![TransitionAction::ParkMusic]
        );

        // Silence done at 6800ms -> chime fires.
        assert_eq!(
            scheduler.poll(t0 + ms(6800)),
            vec![TransitionAction::PlayChime]
        );
        assert_eq!(scheduler.stage(), Some(TransitionStage::AdvanceDelay));

        // Advance delay done at 8800ms -> advance, sequence over.
        assert_eq!(scheduler.poll(t0 + ms(8800)), vec![TransitionAction::Advance]);
        assert!(!scheduler.is_active());

        // Done means done: no further actions ever.
        assert!(scheduler.poll(t0 + ms(60_000)).is_empty());
    }

    #[test]
    fn timeline_without_music_skips_fades_but_keeps_timing() {
        let mut scheduler = TransitionScheduler::new(TransitionTiming::default());
        let t0 = Instant::now();

        assert_eq!(scheduler.start(t0, false), None);
        assert!(scheduler.poll(t0 + ms(2800)).is_empty());
        assert!(scheduler.poll(t0 + ms(5800)).is_empty());
        assert_eq!(
            scheduler.poll(t0 + ms(6800)),
            vec![TransitionAction::PlayChime]
        );
        assert_eq!(scheduler.poll(t0 + ms(8800)), vec![TransitionAction::Advance]);
    }

    #[test]
    fn cancel_drops_all_pending_steps() {
        let mut scheduler = TransitionScheduler::new(TransitionTiming::default());
        let t0 = Instant::now();

        scheduler.start(t0, true);
        scheduler.poll(t0 + ms(2800));
        scheduler.cancel();

        assert!(!scheduler.is_active());
        // No chime, no advance, no matter how long we wait.
        assert!(scheduler.poll(t0 + ms(60_000)).is_empty());
    }

    #[test]
    fn coarse_poll_catches_up_entire_sequence() {
        let mut scheduler = TransitionScheduler::new(TransitionTiming::default());
        let t0 = Instant::now();

        scheduler.start(t0, true);
        let actions = scheduler.poll(t0 + ms(10_000));
        assert_eq!(
            actions,
            vec![
                TransitionAction::FadeOutMusic { duration: ms(3000) },
                TransitionAction::ParkMusic,
                TransitionAction::PlayChime,
                TransitionAction::Advance,
            ]
        );
        assert!(!scheduler.is_active());
    }

    #[test]
    fn restart_replaces_previous_sequence() {
        let mut scheduler = TransitionScheduler::new(TransitionTiming::default());
        let t0 = Instant::now();

        scheduler.start(t0, true);
        scheduler.poll(t0 + ms(2800));

        // A fresh narration-ended restarts from the top.
        scheduler.start(t0 + ms(3000), true);
        assert_eq!(scheduler.stage(), Some(TransitionStage::MusicSwelling));
        assert!(scheduler.poll(t0 + ms(3100)).is_empty());
    }
}
