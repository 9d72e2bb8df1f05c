//! Storydrop catalog client.
//!
//! Fetches the ordered list of playable stories from the remote catalog
//! (a PostgREST-style endpoint) and degrades gracefully to a bundled demo
//! dataset when the catalog is unreachable, empty, or unconfigured.
//!
//! # Example
//!
//! ```ignore
//! use storydrop_catalog::{CatalogClient, CatalogConfig, CatalogSource};
//!
//! let config = CatalogConfig::new("https://catalog.example.com", "anon-key");
//! let client = CatalogClient::new(config)?;
//!
//! // Fetch with demo fallback; `source` tells the UI whether to show
//! // the "using demo content" notice.
//! let load = client.load_catalog().await;
//! if load.source == CatalogSource::Demo {
//!     println!("{}", load.notice().unwrap());
//! }
//! println!("{} stories", load.stories.len());
//! ```

mod client;
mod demo;
mod error;
mod types;

pub use client::CatalogClient;
pub use demo::demo_stories;
pub use error::{CatalogError, Result};
pub use types::{CatalogConfig, CatalogLoad, CatalogSource, NOTICE_DISMISS_SECS};
