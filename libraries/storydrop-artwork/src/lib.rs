//! Storydrop Artwork - Show artwork URL resolution
//!
//! Show images live in object storage and are delivered through an image
//! transformation endpoint. This library rewrites raw storage references
//! into fully qualified, transformation-parameterized URLs and provides
//! the fixed fallback used when an image fails to load.
//!
//! # Example
//!
//! ```
//! use storydrop_artwork::{ArtworkResolver, ArtworkSize};
//!
//! let resolver = ArtworkResolver::new("https://media.example.com").unwrap();
//! let url = resolver
//!     .resolve("1750190747152.png", ArtworkSize::SmallThumb)
//!     .unwrap();
//! assert!(url.contains("width=192"));
//! ```

mod error;
mod resolver;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use resolver::{ArtworkResolver, ArtworkSize, FALLBACK_IMAGE_URL};
