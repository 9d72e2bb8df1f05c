//! Bundled demo dataset.
//!
//! Used whenever the remote catalog is unreachable, returns nothing, or
//! no credentials are configured. Mirrors the shape of real catalog rows
//! so the player exercises every code path (music beds, captions, and
//! stories missing both).

use storydrop_core::{Show, Story, StoryId};

const DEMO_MEDIA_BASE: &str = "https://demo.storydrop.app/media";

/// Fixed demo stories, in feed order.
pub fn demo_stories() -> Vec<Story> {
    vec![
        Story {
            id: StoryId::new("demo-1"),
            title: "The Change of Seasons".to_string(),
            narration_audio_url: format!("{DEMO_MEDIA_BASE}/stories/demo-1/narration.mp3"),
            music_url: Some(format!("{DEMO_MEDIA_BASE}/static/bed.mp3")),
            script: Some(
                "Speaker 1: Welcome to Menopause Matters. Today we're discussing the change \
                 of seasons in our bodies. [laugh] It's important to understand that menopause \
                 is a natural transition. Speaker 2: Absolutely, and many women find this time \
                 to be empowering."
                    .to_string(),
            ),
            show: Show {
                name: "Menopause Matters".to_string(),
                image_url: Some("1750366730893.png".to_string()),
                slug: Some("menopause-matters".to_string()),
            },
            like_count: 42,
        },
        Story {
            id: StoryId::new("demo-2"),
            title: "The Tiny Explorer".to_string(),
            narration_audio_url: format!("{DEMO_MEDIA_BASE}/stories/demo-2/narration.mp3"),
            music_url: Some(format!("{DEMO_MEDIA_BASE}/static/bed.mp3")),
            script: Some(
                "Speaker 1: Once upon a time, there was a tiny mouse named Oliver who lived \
                 in a cozy burrow beneath the old oak tree. [sound of birds chirping] Every \
                 morning, Oliver would wake up excited to explore the world around him. \
                 Speaker 2: Today was different though."
                    .to_string(),
            ),
            show: Show {
                name: "Tiny Tales".to_string(),
                image_url: Some("1750319500256.png".to_string()),
                slug: Some("tiny-tales".to_string()),
            },
            like_count: 28,
        },
        // No script: caption display disabled for this one.
        Story {
            id: StoryId::new("demo-3"),
            title: "Midnight in the Garden".to_string(),
            narration_audio_url: format!("{DEMO_MEDIA_BASE}/stories/demo-3/narration.mp3"),
            music_url: Some(format!("{DEMO_MEDIA_BASE}/static/bed.mp3")),
            script: None,
            show: Show {
                name: "Tiny Tales".to_string(),
                image_url: Some("1750190747152.png".to_string()),
                slug: Some("tiny-tales".to_string()),
            },
            like_count: 35,
        },
        // No music bed: plays narration only, no lead-in or ducking.
        Story {
            id: StoryId::new("demo-4"),
            title: "The Last Sunset".to_string(),
            narration_audio_url: format!("{DEMO_MEDIA_BASE}/stories/demo-4/narration.mp3"),
            music_url: None,
            script: None,
            show: Show {
                name: "Tiny Tales".to_string(),
                image_url: Some("1750367739723.png".to_string()),
                slug: Some("tiny-tales".to_string()),
            },
            like_count: 19,
        },
    ]
}
