//! Long-form video resolver. Purely local.

use async_trait::async_trait;

use super::ProviderResolver;
use crate::domain::entities::{EmbedDescriptor, IframeEmbed, ProviderKind, SizingClass};
use crate::domain::errors::ResolveError;
use crate::domain::services::url_patterns;

const PLAYER_PERMISSIONS: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Builds 16:9 player frames from the video id in the URL.
pub struct LongFormVideoResolver {
    embed_base: String,
}

impl LongFormVideoResolver {
    /// Creates resolver with the embed page base URL.
    #[must_use]
    pub fn new(embed_base: &str) -> Self {
        Self {
            embed_base: embed_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ProviderResolver for LongFormVideoResolver {
    fn kind(&self) -> ProviderKind {
        ProviderKind::LongFormVideo
    }

    async fn resolve(&self, url: &str) -> Result<EmbedDescriptor, ResolveError> {
        let id = url_patterns::long_form_video_id(url)
            .ok_or_else(|| ResolveError::pattern("video id", url))?;

        Ok(EmbedDescriptor::Iframe(IframeEmbed {
            src: format!("{}/{id}", self.embed_base),
            sizing: SizingClass::Widescreen,
            allow: Some(PLAYER_PERMISSIONS.to_string()),
            allow_fullscreen: true,
            scrolling: true,
            height_px: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_link_resolves_to_embed() {
        let resolver = LongFormVideoResolver::new("https://www.youtube.com/embed/");

        let descriptor = resolver.resolve("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        assert_eq!(descriptor.src(), Some("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert_eq!(descriptor.sizing(), SizingClass::Widescreen);
    }

    #[tokio::test]
    async fn test_channel_link_produces_nothing() {
        let resolver = LongFormVideoResolver::new("https://www.youtube.com/embed");

        let result = resolver.resolve("https://www.youtube.com/@channel").await;

        assert!(matches!(result, Err(ResolveError::PatternMismatch { .. })));
    }
}
