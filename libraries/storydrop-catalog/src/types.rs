//! Catalog configuration and wire types.

use rand::Rng;
use serde::{Deserialize, Serialize};
use storydrop_core::{Show, Story, StoryId};

/// Configuration for the catalog client.
///
/// Credentials are injected at runtime (see the server's `/env.js`
/// generation); a missing key is not an error here — the client degrades
/// to the demo dataset instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog service base URL (e.g. `https://catalog.example.com`)
    pub url: String,

    /// Anonymous API key, sent as both `apikey` and bearer token
    pub anon_key: Option<String>,

    /// Maximum number of stories to fetch (default: 50)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

impl CatalogConfig {
    /// Create a config with a URL and anon key.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: Some(anon_key.into()),
            limit: default_limit(),
        }
    }

    /// Create a config with no credentials (demo dataset only).
    pub fn unconfigured() -> Self {
        Self {
            url: String::new(),
            anon_key: None,
            limit: default_limit(),
        }
    }
}

/// Where a catalog load's stories came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogSource {
    /// Fetched from the remote catalog
    Remote,

    /// Bundled demo dataset (remote failed, was empty, or unconfigured)
    Demo,
}

/// Result of a catalog load with fallback applied.
///
/// Always carries at least one story.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    /// Stories, shuffled, ready for the feed
    pub stories: Vec<Story>,

    /// Which source supplied them
    pub source: CatalogSource,
}

pub use storydrop_core::NOTICE_DISMISS_SECS;

impl CatalogLoad {
    /// Transient notice text to surface when running on demo content.
    ///
    /// Returns `None` for remote loads. The UI auto-dismisses the banner
    /// after [`NOTICE_DISMISS_SECS`].
    pub fn notice(&self) -> Option<&'static str> {
        match self.source {
            CatalogSource::Remote => None,
            CatalogSource::Demo => Some("No stories available. Using demo content."),
        }
    }
}

/// A `stories` row as returned by the catalog endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct StoryRow {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub script: Option<String>,

    #[serde(rename = "ttsAudioUrl")]
    pub tts_audio_url: Option<String>,

    #[serde(rename = "showSlug", default)]
    pub show_slug: Option<String>,

    #[serde(default)]
    pub shows: Option<ShowRow>,
}

/// Embedded `shows` record on a story row.
#[derive(Debug, Deserialize)]
pub(crate) struct ShowRow {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub music_url: Option<String>,
}

impl StoryRow {
    /// Convert a row into a `Story`, or `None` if it has no narration.
    ///
    /// The catalog has no like counts yet, so display counts are
    /// randomized in 10..=300 like the original feed.
    pub(crate) fn into_story(self, rng: &mut impl Rng) -> Option<Story> {
        let narration_audio_url = self.tts_audio_url.filter(|u| !u.is_empty())?;
        let shows = self.shows;

        Some(Story {
            id: StoryId::new(self.id),
            title: self.title.unwrap_or_else(|| "Untitled Story".to_string()),
            narration_audio_url,
            music_url: shows
                .as_ref()
                .and_then(|s| s.music_url.clone())
                .filter(|u| !u.is_empty()),
            script: self.script.filter(|s| !s.is_empty()),
            show: Show {
                name: shows
                    .as_ref()
                    .and_then(|s| s.name.clone())
                    .unwrap_or_default(),
                image_url: shows
                    .and_then(|s| s.image_url)
                    .filter(|u| !u.is_empty()),
                slug: self.show_slug,
            },
            like_count: rng.gen_range(10..=300),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(7)
    }

    #[test]
    fn row_without_narration_is_dropped() {
        let row: StoryRow =
            serde_json::from_str(r#"{"id": "s1", "title": "x", "ttsAudioUrl": null}"#).unwrap();
        assert!(row.into_story(&mut rng()).is_none());
    }

    #[test]
    fn full_row_maps_every_field() {
        let row: StoryRow = serde_json::from_str(
            r#"{
                "id": "s2",
                "title": "The Last Sunset",
                "script": "Speaker 1: ...",
                "ttsAudioUrl": "https://cdn.example.com/s2.mp3",
                "showSlug": "tiny-tales",
                "shows": {
                    "name": "Tiny Tales",
                    "image_url": "1750367739723.png",
                    "music_url": "https://cdn.example.com/bed.mp3"
                }
            }"#,
        )
        .unwrap();

        let story = row.into_story(&mut rng()).unwrap();
        assert_eq!(story.id.as_str(), "s2");
        assert_eq!(story.title, "The Last Sunset");
        assert_eq!(story.show.name, "Tiny Tales");
        assert_eq!(story.show.slug.as_deref(), Some("tiny-tales"));
        assert!(story.has_music());
        assert!(story.captions_available());
        assert!((10..=300).contains(&story.like_count));
    }

    #[test]
    fn empty_optional_strings_become_none() {
        let row: StoryRow = serde_json::from_str(
            r#"{
                "id": "s3",
                "title": "Quiet",
                "script": "",
                "ttsAudioUrl": "https://cdn.example.com/s3.mp3",
                "shows": {"name": "Tiny Tales", "image_url": "", "music_url": ""}
            }"#,
        )
        .unwrap();

        let story = row.into_story(&mut rng()).unwrap();
        assert!(!story.has_music());
        assert!(!story.captions_available());
        assert!(story.show.image_url.is_none());
    }

    #[test]
    fn demo_load_carries_notice() {
        let load = CatalogLoad {
            stories: crate::demo_stories(),
            source: CatalogSource::Demo,
        };
        assert!(load.notice().is_some());

        let load = CatalogLoad {
            stories: crate::demo_stories(),
            source: CatalogSource::Remote,
        };
        assert!(load.notice().is_none());
    }
}
