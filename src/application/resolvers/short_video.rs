//! Short-form video resolver.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ProviderResolver;
use crate::domain::entities::{EmbedDescriptor, IframeEmbed, ProviderKind, SizingClass};
use crate::domain::errors::ResolveError;
use crate::domain::ports::{FetchPort, FetchRequest};
use crate::domain::services::url_patterns;

const PLAYER_PERMISSIONS: &str = "encrypted-media; autoplay; clipboard-write;";

/// Resolves short video links, following shortener redirects with a HEAD request.
pub struct ShortVideoResolver {
    fetch: Arc<dyn FetchPort>,
    embed_base: String,
}

impl ShortVideoResolver {
    /// Creates resolver with the embed page base URL.
    #[must_use]
    pub fn new(fetch: Arc<dyn FetchPort>, embed_base: &str) -> Self {
        Self {
            fetch,
            embed_base: embed_base.trim_end_matches('/').to_string(),
        }
    }

    async fn landing_url(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.fetch.request(FetchRequest::head(url)).await?;

        if !url_patterns::has_video_path(&response.final_url) {
            return Err(ResolveError::pattern("video path", response.final_url));
        }

        debug!(short = %url, resolved = %response.final_url, "Resolved short video link");
        Ok(response.final_url)
    }

    fn descriptor(&self, url: &str) -> Result<EmbedDescriptor, ResolveError> {
        let id = url_patterns::short_video_id(url)
            .ok_or_else(|| ResolveError::pattern("video id", url))?;

        Ok(EmbedDescriptor::Iframe(IframeEmbed {
            src: format!("{}/{id}", self.embed_base),
            sizing: SizingClass::VerticalPlayer,
            allow: Some(PLAYER_PERMISSIONS.to_string()),
            allow_fullscreen: true,
            scrolling: false,
            height_px: None,
        }))
    }
}

#[async_trait]
impl ProviderResolver for ShortVideoResolver {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ShortVideo
    }

    async fn resolve(&self, url: &str) -> Result<EmbedDescriptor, ResolveError> {
        if url_patterns::is_short_video_redirect(url) {
            let landing = self.landing_url(url).await?;
            self.descriptor(&landing)
        } else {
            self.descriptor(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FetchMethod;
    use crate::domain::ports::mocks::MockFetcher;

    const EMBED_BASE: &str = "https://www.tiktok.com/embed/v2";

    #[tokio::test]
    async fn test_canonical_url_needs_no_request() {
        let fetch = Arc::new(MockFetcher::new());
        let resolver = ShortVideoResolver::new(fetch.clone(), EMBED_BASE);

        let descriptor = resolver
            .resolve("https://www.tiktok.com/@user/video/1234567890123456789")
            .await
            .unwrap();

        let EmbedDescriptor::Iframe(frame) = descriptor else {
            panic!("expected iframe");
        };
        assert_eq!(frame.src, "https://www.tiktok.com/embed/v2/1234567890123456789");
        assert_eq!(frame.sizing, SizingClass::VerticalPlayer);
        assert!(frame.allow_fullscreen);
        assert!(frame.allow.unwrap().contains("clipboard-write"));
        assert!(fetch.requests().is_empty());
    }

    #[tokio::test]
    async fn test_short_link_follows_redirect() {
        let fetch = Arc::new(MockFetcher::new().redirect(
            "https://vm.tiktok.com/ZMabcdefg/",
            "https://www.tiktok.com/@user/video/987?_r=1",
        ));
        let resolver = ShortVideoResolver::new(fetch.clone(), EMBED_BASE);

        let descriptor = resolver
            .resolve("https://vm.tiktok.com/ZMabcdefg/")
            .await
            .unwrap();

        assert_eq!(descriptor.src(), Some("https://www.tiktok.com/embed/v2/987"));
        let requests = fetch.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, FetchMethod::Head);
    }

    #[tokio::test]
    async fn test_short_link_without_video_path_is_dropped() {
        let fetch = Arc::new(MockFetcher::new().redirect(
            "https://vm.tiktok.com/ZMabcdefg/",
            "https://www.tiktok.com/@user",
        ));
        let resolver = ShortVideoResolver::new(fetch, EMBED_BASE);

        let result = resolver.resolve("https://vm.tiktok.com/ZMabcdefg/").await;

        assert!(matches!(result, Err(ResolveError::PatternMismatch { .. })));
    }

    #[tokio::test]
    async fn test_short_link_request_failure_is_dropped() {
        let resolver = ShortVideoResolver::new(Arc::new(MockFetcher::new()), EMBED_BASE);

        let result = resolver.resolve("https://vt.tiktok.com/ZSxyz/").await;

        assert!(matches!(result, Err(ResolveError::Network(_))));
    }

    #[tokio::test]
    async fn test_canonical_url_without_id_is_dropped() {
        let resolver = ShortVideoResolver::new(Arc::new(MockFetcher::new()), EMBED_BASE);

        let result = resolver.resolve("https://www.tiktok.com/@user").await;

        assert!(matches!(result, Err(ResolveError::PatternMismatch { .. })));
    }
}
