use crate::error::{ArtworkError, Result};
use url::Url;

/// Fixed fallback shown when a show image fails to load
pub const FALLBACK_IMAGE_URL: &str = "/assets/cover-fallback.png";

/// Size presets understood by the image transformation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtworkSize {
    /// Full-bleed story background (contain, width 500)
    #[default]
    Full,

    /// 192x192 thumbnail for lock-screen artwork
    SmallThumb,

    /// 512x512 thumbnail for lock-screen artwork
    LargeThumb,
}

impl ArtworkSize {
    /// Query string for this preset
    fn query(self) -> &'static str {
        match self {
            ArtworkSize::Full => "resize=contain&quality=50&width=500",
            ArtworkSize::SmallThumb => "resize=cover&quality=50&width=192&height=192",
            ArtworkSize::LargeThumb => "resize=cover&quality=50&width=512&height=512",
        }
    }

    /// Pixel dimensions advertised to the media session, if square
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self {
            ArtworkSize::Full => None,
            ArtworkSize::SmallThumb => Some((192, 192)),
            ArtworkSize::LargeThumb => Some((512, 512)),
        }
    }
}

/// Resolves raw image references into transformation endpoint URLs
///
/// Storage serves originals under an `/object/` path; the transformation
/// endpoint mirrors that tree under `/render/image/`. Resolution rewrites
/// the path and appends the size preset's parameters.
#[derive(Debug, Clone)]
pub struct ArtworkResolver {
    base: Url,
}

impl ArtworkResolver {
    /// Create a resolver over the given media service base URL
    pub fn new(media_base: &str) -> Result<Self> {
        let base = Url::parse(media_base)
            .map_err(|e| ArtworkError::InvalidBaseUrl(format!("{media_base}: {e}")))?;
        Ok(Self { base })
    }

    /// Resolve a raw image reference into a transformed URL
    ///
    /// Absolute references are rewritten in place; storage-relative
    /// references are first joined against the media base.
    pub fn resolve(&self, reference: &str, size: ArtworkSize) -> Result<String> {
        if reference.is_empty() {
            return Err(ArtworkError::InvalidReference("empty reference".into()));
        }

        let absolute = if reference.starts_with("http://") || reference.starts_with("https://") {
            Url::parse(reference)
                .map_err(|e| ArtworkError::InvalidReference(format!("{reference}: {e}")))?
        } else {
            self.base
                .join(&format!("object/public/media/{reference}"))
                .map_err(|e| ArtworkError::InvalidReference(format!("{reference}: {e}")))?
        };

        // Rewrite the storage path to the transformation endpoint
        let mut transformed = absolute.as_str().replacen("/object/", "/render/image/", 1);

        let separator = if transformed.contains('?') { '&' } else { '?' };
        transformed.push(separator);
        transformed.push_str(size.query());

        Ok(transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ArtworkResolver {
        ArtworkResolver::new("https://media.example.com/storage/v1/").unwrap()
    }

    #[test]
    fn absolute_reference_is_rewritten_to_render_endpoint() {
        let url = resolver()
            .resolve(
                "https://media.example.com/storage/v1/object/public/media/shows/a.png",
                ArtworkSize::Full,
            )
            .unwrap();
        assert_eq!(
            url,
            "https://media.example.com/storage/v1/render/image/public/media/shows/a.png?resize=contain&quality=50&width=500"
        );
    }

    #[test]
    fn relative_reference_is_joined_against_media_base() {
        let url = resolver()
            .resolve("1750190747152.png", ArtworkSize::SmallThumb)
            .unwrap();
        assert_eq!(
            url,
            "https://media.example.com/storage/v1/render/image/public/media/1750190747152.png?resize=cover&quality=50&width=192&height=192"
        );
    }

    #[test]
    fn existing_query_params_are_preserved() {
        let url = resolver()
            .resolve(
                "https://media.example.com/storage/v1/object/a.png?token=xyz",
                ArtworkSize::LargeThumb,
            )
            .unwrap();
        assert!(url.ends_with("?token=xyz&resize=cover&quality=50&width=512&height=512"));
    }

    #[test]
    fn empty_reference_is_rejected() {
        assert!(matches!(
            resolver().resolve("", ArtworkSize::Full),
            Err(ArtworkError::InvalidReference(_))
        ));
    }

    #[test]
    fn thumbnail_dimensions() {
        assert_eq!(ArtworkSize::SmallThumb.dimensions(), Some((192, 192)));
        assert_eq!(ArtworkSize::LargeThumb.dimensions(), Some((512, 512)));
        assert_eq!(ArtworkSize::Full.dimensions(), None);
    }
}
