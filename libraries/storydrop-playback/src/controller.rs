//! Playback controller - core orchestration
//!
//! Sole owner of the two content channels, the chime, the playback phase,
//! and the ending choreography. Every other component either feeds
//! commands in (gestures, OS media controls) or reads projected state out
//! (UI sync, media session); nothing else mutates audio state.
//!
//! Every asynchronous boundary — load readiness, the music lead-in, fade
//! steps, choreography deadlines — is a point where competing input may
//! arrive. A transition generation counter is checked at each resume
//! point so stale callbacks from an abandoned story switch never touch
//! current state.

use crate::channel::{AudioChannel, LoadState};
use crate::error::{PlaybackError, Result};
use crate::events::{PlayerCommand, PlayerEvent};
use crate::gesture::{Gesture, GestureRouter, GestureTarget};
use crate::media::{MediaElement, MediaEvent};
use crate::scheduler::{TransitionAction, TransitionScheduler};
use crate::types::{ChannelKind, PlaybackPhase, PlayerConfig};
use crate::ui::{CaptionViewport, MediaArtwork, MediaSessionState, UiSnapshot};
use std::time::{Duration, Instant};
use storydrop_artwork::{ArtworkResolver, ArtworkSize, FALLBACK_IMAGE_URL};
use storydrop_core::{Story, NOTICE_DISMISS_SECS};
use tracing::{debug, warn};

/// Outstanding loads for one story switch
#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    generation: u64,
    autoplay: bool,
    narration_ready: bool,
    music_settled: bool,
}

/// The playback controller
///
/// One instance per page session, explicitly constructed and owned by the
/// application entry point.
pub struct PlaybackController {
    stories: Vec<Story>,
    current_index: usize,
    phase: PlaybackPhase,
    muted: bool,
    activated: bool,

    narration: AudioChannel,
    music: AudioChannel,
    chime: AudioChannel,

    scheduler: TransitionScheduler,
    gesture: GestureRouter,
    config: PlayerConfig,
    artwork: Option<ArtworkResolver>,

    /// Bumped on every story switch; stale async completions compare
    /// against it and are discarded.
    generation: u64,
    pending_load: Option<PendingLoad>,
    lead_in: Option<(u64, Instant)>,
    narration_ended: bool,

    pending_events: Vec<PlayerEvent>,
}

impl PlaybackController {
    /// Create a controller over three platform media elements.
    pub fn new(
        narration: Box<dyn MediaElement>,
        music: Box<dyn MediaElement>,
        chime: Box<dyn MediaElement>,
        config: PlayerConfig,
        artwork: Option<ArtworkResolver>,
    ) -> Self {
        Self {
            stories: Vec::new(),
            current_index: 0,
            phase: PlaybackPhase::Loading,
            muted: false,
            activated: false,
            narration: AudioChannel::new(ChannelKind::Narration, narration, 1.0, false),
            music: AudioChannel::new(
                ChannelKind::Music,
                music,
                config.music_high_volume,
                true,
            ),
            chime: AudioChannel::new(ChannelKind::Chime, chime, config.chime_volume, false),
            scheduler: TransitionScheduler::new(config.timing),
            gesture: GestureRouter::new(),
            config,
            artwork,
            generation: 0,
            pending_load: None,
            lead_in: None,
            narration_ended: false,
            pending_events: Vec::new(),
        }
    }

    // ===== Lifecycle =====

    /// Set the catalog and reset to `Idle`. Does not autoplay.
    pub fn initialize(&mut self, stories: Vec<Story>) -> Result<()> {
        if stories.is_empty() {
            return Err(PlaybackError::NoStories);
        }

        self.generation += 1;
        self.scheduler.cancel();
        self.lead_in = None;
        self.pending_load = None;
        self.narration_ended = false;
        self.narration.stop();
        self.music.stop();
        self.stories = stories;
        self.current_index = 0;
        self.activated = false;
        self.set_muted(false);
        self.set_phase(PlaybackPhase::Idle);
        Ok(())
    }

    /// Leave the cover screen and preload the first story, paused.
    ///
    /// Autoplay policies may block unsolicited playback, so activation
    /// only loads; audio starts from an explicit play gesture.
    pub fn activate(&mut self, now: Instant) -> Result<()> {
        if self.activated {
            return Ok(());
        }
        self.activated = true;
        self.go_to(0, false, now)
    }

    // ===== Navigation =====

    /// Switch to the story at `index`.
    ///
    /// The central transition primitive. Never wraps: out-of-bounds
    /// indices are a contract violation and are rejected. Wraparound is
    /// the business of [`next`](Self::next) / [`previous`](Self::previous).
    pub fn go_to(&mut self, index: usize, autoplay: bool, _now: Instant) -> Result<()> {
        if self.stories.is_empty() {
            return Err(PlaybackError::NoStories);
        }
        if index >= self.stories.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        // Invalidate every in-flight async continuation before anything
        // else: choreography, lead-in, stale load completions.
        self.generation += 1;
        self.scheduler.cancel();
        self.lead_in = None;
        self.narration_ended = false;

        self.set_phase(PlaybackPhase::Transitioning);
        // Progress/time must drop to the placeholder before any load
        // starts, so the previous story's duration is never shown.
        self.pending_events.push(PlayerEvent::ProgressReset);

        // Stop both content channels synchronously, cancelling fades.
        // The music bed is never left playing across an index change.
        self.narration.stop();
        self.music.stop();

        let previous_story_id = self.current_story().map(|s| s.id.clone());
        self.current_index = index;

        let story = &self.stories[index];
        let story_id = story.id.clone();
        let narration_url = story.narration_audio_url.clone();
        let music_url = story.music_url.clone();

        debug!(index, story = %story_id, autoplay, "Switching story");
        self.pending_events.push(PlayerEvent::StoryChanged {
            index,
            story_id,
            previous_story_id,
        });

        // Music and narration may load concurrently; both must settle
        // before playback starts.
        let has_music = music_url.is_some();
        if let Some(url) = music_url {
            self.music.load(&url);
        }
        self.narration.load(&narration_url);

        self.pending_load = Some(PendingLoad {
            generation: self.generation,
            autoplay,
            narration_ready: false,
            music_settled: !has_music,
        });

        Ok(())
    }

    /// Advance to the next story, wrapping at the end of the feed.
    pub fn next(&mut self, autoplay: bool, now: Instant) -> Result<()> {
        let count = self.story_count();
        if count == 0 {
            return Err(PlaybackError::NoStories);
        }
        self.go_to((self.current_index + 1) % count, autoplay, now)
    }

    /// Go back to the previous story, wrapping at the start of the feed.
    pub fn previous(&mut self, autoplay: bool, now: Instant) -> Result<()> {
        let count = self.story_count();
        if count == 0 {
            return Err(PlaybackError::NoStories);
        }
        self.go_to((self.current_index + count - 1) % count, autoplay, now)
    }

    // ===== Playback control =====

    /// Start or resume playback of the current story.
    ///
    /// No-op while muted or while a story switch is still loading. With a
    /// music bed: resuming mid-story starts the bed at the ducked level
    /// immediately; a fresh story starts the bed at full volume and holds
    /// narration for the lead-in so the music establishes atmosphere.
    pub fn play(&mut self, now: Instant) {
        if self.muted || self.pending_load.is_some() {
            return;
        }
        if matches!(self.phase, PlaybackPhase::Ending | PlaybackPhase::Transitioning) {
            return;
        }
        if !self.narration.is_ready() {
            return;
        }

        if self.music_bed_ready() {
            if self.narration.position() > Duration::ZERO {
                // Resuming mid-story: bed comes back at the ducked level.
                self.music.set_volume(self.config.music_low_volume);
                if let Err(e) = self.music.play() {
                    warn!(error = %e, "Music resume rejected");
                }
                self.start_narration(now);
            } else {
                // Fresh story: bed at full volume, narration held back.
                self.music.set_volume(self.config.music_high_volume);
                if let Err(e) = self.music.play() {
                    warn!(error = %e, "Music start rejected");
                    self.start_narration(now);
                    return;
                }
                self.lead_in = Some((self.generation, now + self.config.music_lead_in));
                self.set_phase(PlaybackPhase::PlayingIntro);
            }
        } else {
            // No bed (absent or failed): narration starts immediately,
            // no lead-in, no fades.
            self.start_narration(now);
        }
    }

    /// Pause narration and music, set the muted master switch.
    ///
    /// Music is paused, not reset, preserving its position for resume.
    /// Muting keeps any would-be auto-advance inert while paused; the
    /// in-flight choreography and lead-in are cancelled outright.
    pub fn pause(&mut self, _now: Instant) {
        self.scheduler.cancel();
        self.lead_in = None;
        self.narration.cancel_fade();
        self.music.cancel_fade();
        self.narration.pause();
        self.music.pause();
        self.set_muted(true);
        self.set_phase(PlaybackPhase::Paused);
    }

    /// Toggle play/pause.
    ///
    /// Resuming after the narration has ended re-triggers the full ending
    /// choreography rather than restarting narration (product decision).
    pub fn toggle(&mut self, now: Instant) {
        match self.phase {
            PlaybackPhase::PlayingIntro | PlaybackPhase::PlayingNarration => self.pause(now),
            // Tap-to-pause cancels the in-flight choreography.
            PlaybackPhase::Ending => self.pause(now),
            // Ignore taps while a story switch is in flight.
            PlaybackPhase::Transitioning => {}
            PlaybackPhase::Paused | PlaybackPhase::Idle | PlaybackPhase::Loading => {
                self.set_muted(false);
                if self.narration_ended {
                    self.begin_ending(now);
                } else {
                    self.play(now);
                }
            }
        }
    }

    // ===== Input routing =====

    /// Handle a command from gestures, buttons, or OS media controls.
    pub fn handle_command(&mut self, command: PlayerCommand, now: Instant) {
        match command {
            PlayerCommand::Play => {
                if !self.is_playing() {
                    self.set_muted(false);
                    if self.narration_ended {
                        self.begin_ending(now);
                    } else {
                        self.play(now);
                    }
                }
            }
            PlayerCommand::Pause => self.pause(now),
            PlayerCommand::Toggle => self.toggle(now),
            PlayerCommand::Next => {
                let autoplay = self.is_playing();
                if let Err(e) = self.next(autoplay, now) {
                    warn!(error = %e, "next rejected");
                }
            }
            PlayerCommand::Previous => {
                let autoplay = self.is_playing();
                if let Err(e) = self.previous(autoplay, now) {
                    warn!(error = %e, "previous rejected");
                }
            }
            PlayerCommand::SkipForward => {
                let target = self.narration.position() + self.config.skip_step;
                let clamped = self
                    .narration
                    .duration()
                    .map_or(target, |d| target.min(d));
                self.narration.seek(clamped);
            }
            PlayerCommand::SkipBackward => {
                let position = self.narration.position();
                let target = position.saturating_sub(self.config.skip_step);
                self.narration.seek(target);
            }
        }
    }

    /// Record a gesture-start position.
    pub fn handle_gesture_start(&mut self, x: f32) {
        self.gesture.begin(x);
    }

    /// Classify and dispatch a gesture on release.
    pub fn handle_gesture_end(&mut self, x: f32, target: GestureTarget, now: Instant) {
        let command = match self.gesture.end(x, target) {
            Some(Gesture::NextStory) => PlayerCommand::Next,
            Some(Gesture::PreviousStory) => PlayerCommand::Previous,
            Some(Gesture::TogglePlayPause) => PlayerCommand::Toggle,
            None => return,
        };
        self.handle_command(command, now);
    }

    // ===== Platform callbacks =====

    /// Fold a media event from one of the platform elements into state.
    pub fn handle_media_event(&mut self, channel: ChannelKind, event: MediaEvent, now: Instant) {
        match channel {
            ChannelKind::Narration => self.narration.handle_event(&event),
            ChannelKind::Music => self.music.handle_event(&event),
            ChannelKind::Chime => self.chime.handle_event(&event),
        }

        match (channel, event) {
            (ChannelKind::Narration, MediaEvent::Ready) => {
                if let Some(mut pending) = self.pending_load {
                    if pending.generation == self.generation {
                        pending.narration_ready = true;
                        self.pending_load = Some(pending);
                        self.try_finish_switch(now);
                    }
                }
            }
            (ChannelKind::Narration, MediaEvent::LoadFailed { reason }) => {
                // Stale failures from an abandoned switch are dropped.
                if self
                    .pending_load
                    .is_some_and(|p| p.generation == self.generation)
                {
                    self.pending_load = None;
                    let error = PlaybackError::MediaLoadFailed {
                        channel: ChannelKind::Narration,
                        reason,
                    };
                    warn!(error = %error, "Narration load failed");
                    self.pending_events.push(PlayerEvent::Error {
                        message: "Error loading audio".to_string(),
                    });
                    self.set_phase(PlaybackPhase::Paused);
                }
            }
            (ChannelKind::Music, MediaEvent::Ready) => {
                if let Some(mut pending) = self.pending_load {
                    if pending.generation == self.generation {
                        pending.music_settled = true;
                        self.pending_load = Some(pending);
                        self.try_finish_switch(now);
                    }
                }
            }
            (ChannelKind::Music, MediaEvent::LoadFailed { reason }) => {
                // Music failure is non-fatal: the story plays without a bed.
                warn!(reason = %reason, "Music load failed, continuing without bed");
                if let Some(mut pending) = self.pending_load {
                    if pending.generation == self.generation {
                        pending.music_settled = true;
                        self.pending_load = Some(pending);
                        self.try_finish_switch(now);
                    }
                }
            }
            (ChannelKind::Narration, MediaEvent::Ended) => {
                if self.phase == PlaybackPhase::PlayingNarration {
                    self.narration_ended = true;
                    self.begin_ending(now);
                }
            }
            (ChannelKind::Narration, MediaEvent::TimeUpdate { position, duration }) => {
                self.pending_events.push(PlayerEvent::PositionUpdate {
                    position_ms: position.as_millis() as u64,
                    duration_ms: duration.map(|d| d.as_millis() as u64),
                });
            }
            _ => {}
        }
    }

    /// Advance time-based machinery: the lead-in, fade ramps, and the
    /// ending choreography. The host calls this on its frame/caption
    /// cadence (≈50 ms).
    pub fn tick(&mut self, now: Instant) {
        // Music lead-in: start narration once the bed has had its moment.
        if let Some((generation, deadline)) = self.lead_in {
            if generation != self.generation {
                self.lead_in = None;
            } else if now >= deadline {
                self.lead_in = None;
                if self.phase == PlaybackPhase::PlayingIntro && !self.muted {
                    self.start_narration(now);
                }
            }
        }

        self.narration.tick(now);
        self.music.tick(now);
        self.chime.tick(now);

        if self.scheduler.is_active() {
            for action in self.scheduler.poll(now) {
                self.apply_transition_action(action, now);
            }
        }
    }

    // ===== Events =====

    /// Drain all queued events for the UI.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether any events are queued.
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Queue a transient banner notice (e.g. the demo-content fallback).
    pub fn notify(&mut self, message: impl Into<String>) {
        self.pending_events.push(PlayerEvent::Notice {
            message: message.into(),
            dismiss_after_secs: NOTICE_DISMISS_SECS,
        });
    }

    // ===== Projections =====

    /// Current playback phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Muted master switch.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether the player counts as "playing" for gesture/media-control
    /// autoplay preservation. The ending choreography counts: swiping
    /// during it should autoplay the next story.
    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase,
            PlaybackPhase::PlayingIntro | PlaybackPhase::PlayingNarration | PlaybackPhase::Ending
        )
    }

    /// Index of the current story.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of stories in the feed.
    pub fn story_count(&self) -> usize {
        self.stories.len()
    }

    /// The current story, once initialized.
    pub fn current_story(&self) -> Option<&Story> {
        self.stories.get(self.current_index)
    }

    /// Narration position.
    pub fn position(&self) -> Duration {
        self.narration.position()
    }

    /// Narration duration, once known.
    pub fn duration(&self) -> Option<Duration> {
        self.narration.duration()
    }

    /// Fully qualified background image URL for the current story, with
    /// the fixed fallback when the reference is missing or unresolvable.
    pub fn background_image_url(&self) -> String {
        let resolved = self.current_story().and_then(|story| {
            let image = story.show.image_url.as_deref()?;
            let resolver = self.artwork.as_ref()?;
            resolver.resolve(image, ArtworkSize::Full).ok()
        });
        resolved.unwrap_or_else(|| FALLBACK_IMAGE_URL.to_string())
    }

    /// Project current state for the page (progress, labels, indicator,
    /// captions scroll).
    pub fn ui_snapshot(&self, captions: Option<CaptionViewport>) -> UiSnapshot {
        UiSnapshot::project(
            self.phase,
            self.narration.position(),
            self.narration.duration(),
            captions,
        )
    }

    /// Mirror state for the OS media session, once a story is current.
    pub fn media_session_state(&self) -> Option<MediaSessionState> {
        let story = self.current_story()?;

        let mut artwork = Vec::new();
        if let (Some(resolver), Some(image)) = (&self.artwork, &story.show.image_url) {
            for size in [ArtworkSize::SmallThumb, ArtworkSize::LargeThumb] {
                if let (Ok(src), Some((w, h))) = (resolver.resolve(image, size), size.dimensions())
                {
                    artwork.push(MediaArtwork {
                        src,
                        sizes: format!("{w}x{h}"),
                    });
                }
            }
        }

        let duration = self.narration.duration();
        let position = duration.map_or(self.narration.position(), |d| {
            self.narration.position().min(d)
        });

        Some(MediaSessionState {
            title: story.title.clone(),
            artist: format!("Storydrop - {}", story.show.name),
            album: story.show.name.clone(),
            artwork,
            duration_ms: duration.map(|d| d.as_millis() as u64),
            position_ms: position.as_millis() as u64,
            playback_rate: if self.phase == PlaybackPhase::PlayingNarration {
                1.0
            } else {
                0.0
            },
        })
    }

    // ===== Internals =====

    /// Complete a story switch once narration is ready and music settled.
    fn try_finish_switch(&mut self, now: Instant) {
        let Some(pending) = self.pending_load else {
            return;
        };
        if !(pending.narration_ready && pending.music_settled) {
            return;
        }
        self.pending_load = None;

        if pending.autoplay && !self.muted {
            // Leave Transitioning before play() so its phase guard passes.
            self.set_phase(PlaybackPhase::Paused);
            self.play(now);
        } else {
            self.set_phase(PlaybackPhase::Paused);
        }
    }

    /// Start (or resume) narration playback and duck the bed under it.
    fn start_narration(&mut self, now: Instant) {
        match self.narration.play() {
            Ok(()) => {
                self.set_phase(PlaybackPhase::PlayingNarration);
                // Duck the bed under narration if it is sitting above the
                // low level (fresh start after the lead-in).
                if self.music_bed_ready() && self.music.volume() > self.config.music_low_volume {
                    self.music
                        .begin_fade(self.config.music_low_volume, self.config.duck_fade, now);
                }
            }
            Err(e) => {
                // Typically an autoplay-policy rejection. Report it and
                // revert to a consistent paused state, no partial audio.
                warn!(error = %e, "Narration start rejected");
                self.music.pause();
                self.pending_events.push(PlayerEvent::Error {
                    message: format!("Error playing audio: {e}"),
                });
                self.set_phase(PlaybackPhase::Paused);
            }
        }
    }

    /// Enter the ending choreography from a narration-ended event or an
    /// ended-resume toggle.
    fn begin_ending(&mut self, now: Instant) {
        self.set_phase(PlaybackPhase::Ending);
        let music_audible = self.music_bed_ready();
        if let Some(action) = self.scheduler.start(now, music_audible) {
            self.apply_transition_action(action, now);
        }
    }

    fn apply_transition_action(&mut self, action: TransitionAction, now: Instant) {
        match action {
            TransitionAction::SwellMusic { duration } => {
                if let Err(e) = self.music.play() {
                    warn!(error = %e, "Music swell rejected");
                }
                self.music
                    .begin_fade(self.config.music_high_volume, duration, now);
            }
            TransitionAction::FadeOutMusic { duration } => {
                self.music.begin_fade(0.0, duration, now);
            }
            TransitionAction::ParkMusic => {
                self.music.reset();
            }
            TransitionAction::PlayChime => {
                self.chime.seek(Duration::ZERO);
                if let Err(e) = self.chime.play() {
                    // Fire-and-forget: a blocked chime never stalls the
                    // advance.
                    warn!(error = %e, "Transition chime could not play");
                }
            }
            TransitionAction::Advance => {
                if let Err(e) = self.next(true, now) {
                    warn!(error = %e, "Auto-advance failed");
                }
            }
        }
    }

    /// Whether the current story's music bed is loaded and usable.
    fn music_bed_ready(&self) -> bool {
        self.current_story().is_some_and(Story::has_music) && self.music.is_ready()
    }

    fn set_phase(&mut self, phase: PlaybackPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.pending_events
                .push(PlayerEvent::PhaseChanged { phase });
        }
    }

    fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.muted = muted;
            self.pending_events
                .push(PlayerEvent::MutedChanged { muted });
        }
    }

    /// Load state of the music channel (informational).
    pub fn music_load_state(&self) -> LoadState {
        self.music.load_state()
    }
}
