//! Catalog HTTP client.

use crate::demo::demo_stories;
use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, CatalogLoad, CatalogSource, StoryRow};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use storydrop_core::{Story, StoryId};
use tracing::{debug, info, warn};
use url::Url;

/// Client for the remote story catalog.
///
/// The catalog is a PostgREST-style endpoint; stories live in a `stories`
/// table with an embedded `shows` record. Rows without a narration URL
/// are filtered out server-side.
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    base: Option<Url>,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    ///
    /// An unconfigured client (no anon key) is valid and always degrades
    /// to the demo dataset; a configured client requires a parseable
    /// http(s) base URL.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let base = if config.anon_key.is_some() {
            // Normalized trailing slash so `join` appends instead of
            // replacing the last path segment.
            let url = format!("{}/", config.url.trim_end_matches('/'));
            let parsed = Url::parse(&url)
                .map_err(|e| CatalogError::InvalidUrl(format!("{}: {e}", config.url)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CatalogError::InvalidUrl(
                    "URL must start with http:// or https://".into(),
                ));
            }
            Some(parsed)
        } else {
            None
        };

        // HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Storydrop/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self { http, base, config })
    }

    /// Endpoint of the `stories` table, once credentials are configured.
    fn stories_endpoint(&self) -> Result<Url> {
        let base = self.base.as_ref().ok_or(CatalogError::MissingCredentials)?;
        base.join("rest/v1/stories")
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))
    }

    /// Fetch the story list from the remote catalog.
    ///
    /// Returns the transformed, shuffled list. Errors here are recoverable;
    /// callers normally go through [`load_catalog`](Self::load_catalog)
    /// which applies the demo fallback.
    pub async fn fetch_stories(&self) -> Result<Vec<Story>> {
        let Some(ref anon_key) = self.config.anon_key else {
            return Err(CatalogError::MissingCredentials);
        };
        let url = self.stories_endpoint()?;

        debug!(url = %url, limit = self.config.limit, "Fetching stories");

        let response = self
            .http
            .get(url)
            .header("apikey", anon_key)
            .bearer_auth(anon_key)
            .query(&[
                (
                    "select",
                    "id,title,script,ttsAudioUrl,updatedAt,showSlug,shows(name,image_url,music_url)",
                ),
                ("ttsAudioUrl", "not.is.null"),
                ("order", "updatedAt.desc"),
                ("limit", &self.config.limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::CatalogError {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<StoryRow> = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse story rows: {e}"))
        })?;

        let mut rng = rand::thread_rng();
        let mut stories: Vec<Story> = rows
            .into_iter()
            .filter_map(|row| row.into_story(&mut rng))
            .collect();

        if stories.is_empty() {
            return Err(CatalogError::Empty);
        }

        // Present the feed in a fresh order each session.
        stories.shuffle(&mut rng);

        info!(count = stories.len(), "Fetched stories from catalog");
        Ok(stories)
    }

    /// Lazily fetch the caption script for one story.
    ///
    /// Used when the feed query omitted `script` or it arrived empty.
    /// `Ok(None)` means the story exists but has no script (captions
    /// disabled); an unknown id is [`CatalogError::StoryNotFound`].
    pub async fn fetch_script(&self, id: &StoryId) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct ScriptRow {
            script: Option<String>,
        }

        let Some(ref anon_key) = self.config.anon_key else {
            return Err(CatalogError::MissingCredentials);
        };
        let url = self.stories_endpoint()?;

        let response = self
            .http
            .get(url)
            .header("apikey", anon_key)
            .bearer_auth(anon_key)
            .query(&[
                ("select", "script"),
                ("id", &format!("eq.{id}")),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::CatalogError {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<ScriptRow> = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(format!("Failed to parse script row: {e}")))?;

        match rows.into_iter().next() {
            Some(row) => Ok(row.script.filter(|s| !s.is_empty())),
            None => Err(CatalogError::StoryNotFound(id.to_string())),
        }
    }

    /// Fetch the catalog, falling back to the demo dataset.
    ///
    /// Never fails and never returns an empty list: any fetch error or an
    /// empty result degrades to [`demo_stories`]. The returned
    /// [`CatalogSource`] tells the caller whether to surface the transient
    /// demo-content notice.
    pub async fn load_catalog(&self) -> CatalogLoad {
        match self.fetch_stories().await {
            Ok(stories) => CatalogLoad {
                stories,
                source: CatalogSource::Remote,
            },
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, using demo dataset");
                CatalogLoad {
                    stories: demo_stories(),
                    source: CatalogSource::Demo,
                }
            }
        }
    }
}
