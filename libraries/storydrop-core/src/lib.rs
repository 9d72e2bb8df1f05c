//! Storydrop Core
//!
//! Shared data model for the Storydrop story player.
//!
//! This crate defines the `Story` record as delivered by the catalog and
//! consumed by the playback core, plus the `Show` branding metadata that
//! rides along with it. Stories are read-only once fetched; all mutable
//! playback state lives in `storydrop-playback`.
//!
//! # Example
//!
//! ```rust
//! use storydrop_core::{Show, Story, StoryId};
//!
//! let story = Story {
//!     id: StoryId::new("story-1"),
//!     title: "The Tiny Explorer".to_string(),
//!     narration_audio_url: "https://cdn.example.com/tts.mp3".to_string(),
//!     music_url: None,
//!     script: None,
//!     show: Show {
//!         name: "Tiny Tales".to_string(),
//!         image_url: None,
//!         slug: Some("tiny-tales".to_string()),
//!     },
//!     like_count: 28,
//! };
//!
//! assert!(!story.captions_available());
//! ```

#![forbid(unsafe_code)]

pub mod types;

pub use types::{Show, Story, StoryId, NOTICE_DISMISS_SECS};
