//! Photo / video post resolver.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use super::ProviderResolver;
use crate::domain::entities::{EmbedDescriptor, IframeEmbed, ProviderKind, SizingClass};
use crate::domain::errors::ResolveError;
use crate::domain::ports::{FetchPort, FetchRequest};
use crate::domain::services::url_patterns;

const POST_EMBED_BASE: &str = "https://www.instagram.com/p";
const POST_FRAME_HEIGHT: u32 = 620;
/// Carousel starts on the first slide with navigation shown.
const CAROUSEL_STATE: &str = "%7B%22ci%22%3A0%2C%22os%22%3A1%7D";

/// Resolves posts through a metadata mirror: direct video when the mirror
/// exposes one, official embed frame otherwise.
pub struct PhotoVideoPostResolver {
    fetch: Arc<dyn FetchPort>,
    mirror_host: String,
    encoded_referrer: String,
}

impl PhotoVideoPostResolver {
    /// Creates resolver with mirror host and embed referrer.
    #[must_use]
    pub fn new(fetch: Arc<dyn FetchPort>, mirror_host: &str, referrer: &str) -> Self {
        Self {
            fetch,
            mirror_host: mirror_host.to_string(),
            encoded_referrer: url::form_urlencoded::byte_serialize(referrer.as_bytes()).collect(),
        }
    }

    fn post_frame(&self, url: &str) -> Result<EmbedDescriptor, ResolveError> {
        let shortcode = url_patterns::post_shortcode(url)
            .ok_or_else(|| ResolveError::pattern("shortcode", url))?;

        let src = format!(
            "{POST_EMBED_BASE}/{shortcode}/embed/?cr=1&v=14&wp=540&rd={}&rp=%2F#{CAROUSEL_STATE}",
            self.encoded_referrer
        );

        Ok(EmbedDescriptor::Iframe(IframeEmbed {
            src,
            sizing: SizingClass::PostFrame,
            allow: None,
            allow_fullscreen: false,
            scrolling: false,
            height_px: Some(POST_FRAME_HEIGHT),
        }))
    }
}

/// Returns the non-empty `og:video` content of a page.
fn video_meta_content(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let selector = Selector::parse(r#"meta[property="og:video"]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ProviderResolver for PhotoVideoPostResolver {
    fn kind(&self) -> ProviderKind {
        ProviderKind::PhotoVideoPost
    }

    async fn resolve(&self, url: &str) -> Result<EmbedDescriptor, ResolveError> {
        let mirror_url = url_patterns::with_host(url, &self.mirror_host)
            .ok_or_else(|| ResolveError::pattern("absolute post URL", url))?;

        let response = self.fetch.request(FetchRequest::get(&mirror_url)).await?;

        if !response.is_success() {
            return Err(ResolveError::UnexpectedStatus {
                status: response.status,
            });
        }

        if let Some(video) = response.text().and_then(video_meta_content) {
            debug!(post = %url, "Post exposes a direct video");
            return Ok(EmbedDescriptor::NativeVideo { src: video });
        }

        self.post_frame(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockFetcher;

    const VIDEO_PAGE: &str = r#"<html><head>
        <meta property="og:title" content="A reel">
        <meta property="og:video" content="https://cdn.vxinstagram.com/v/clip.mp4">
        </head><body></body></html>"#;

    const PHOTO_PAGE: &str = r#"<html><head>
        <meta property="og:image" content="https://cdn.vxinstagram.com/i/photo.jpg">
        </head><body></body></html>"#;

    fn resolver(fetch: MockFetcher) -> PhotoVideoPostResolver {
        PhotoVideoPostResolver::new(Arc::new(fetch), "vxinstagram.com", "https://www.jeuxvideo.com")
    }

    #[tokio::test]
    async fn test_photo_post_uses_official_frame() {
        let fetch = MockFetcher::new().respond_text(
            "https://vxinstagram.com/p/ABC123xyz/",
            200,
            PHOTO_PAGE,
        );

        let descriptor = resolver(fetch)
            .resolve("https://www.instagram.com/p/ABC123xyz/")
            .await
            .unwrap();

        let EmbedDescriptor::Iframe(frame) = descriptor else {
            panic!("expected iframe");
        };
        assert!(frame.src.contains("instagram.com/p/ABC123xyz/embed/"));
        assert!(frame.src.contains("rd=https%3A%2F%2Fwww.jeuxvideo.com"));
        assert_eq!(frame.sizing, SizingClass::PostFrame);
        assert_eq!(frame.height_px, Some(620));
    }

    #[tokio::test]
    async fn test_video_metadata_wins_over_shortcode() {
        let fetch = MockFetcher::new().respond_text(
            "https://vxinstagram.com/reel/C0de_1/",
            200,
            VIDEO_PAGE,
        );

        let descriptor = resolver(fetch)
            .resolve("https://www.instagram.com/reel/C0de_1/")
            .await
            .unwrap();

        assert_eq!(
            descriptor,
            EmbedDescriptor::NativeVideo {
                src: "https://cdn.vxinstagram.com/v/clip.mp4".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_video_metadata_falls_back_to_frame() {
        let page = r#"<html><head><meta property="og:video" content=""></head></html>"#;
        let fetch = MockFetcher::new().respond_text("https://vxinstagram.com/p/XYZ/", 200, page);

        let descriptor = resolver(fetch)
            .resolve("https://www.instagram.com/p/XYZ/")
            .await
            .unwrap();

        assert!(matches!(descriptor, EmbedDescriptor::Iframe(_)));
    }

    #[tokio::test]
    async fn test_error_status_produces_nothing() {
        let fetch =
            MockFetcher::new().respond_text("https://vxinstagram.com/p/ABC/", 404, VIDEO_PAGE);

        let result = resolver(fetch).resolve("https://www.instagram.com/p/ABC/").await;

        assert!(matches!(
            result,
            Err(ResolveError::UnexpectedStatus { status: 404 })
        ));
    }

    #[tokio::test]
    async fn test_profile_link_without_shortcode_produces_nothing() {
        let fetch =
            MockFetcher::new().respond_text("https://vxinstagram.com/someone/", 200, PHOTO_PAGE);

        let result = resolver(fetch).resolve("https://www.instagram.com/someone/").await;

        assert!(matches!(result, Err(ResolveError::PatternMismatch { .. })));
    }

    #[tokio::test]
    async fn test_video_metadata_wins_without_shortcode() {
        let fetch =
            MockFetcher::new().respond_text("https://vxinstagram.com/someone/", 200, VIDEO_PAGE);

        let descriptor = resolver(fetch)
            .resolve("https://www.instagram.com/someone/")
            .await
            .unwrap();

        assert_eq!(
            descriptor,
            EmbedDescriptor::NativeVideo {
                src: "https://cdn.vxinstagram.com/v/clip.mp4".to_string()
            }
        );
    }

    #[test]
    fn test_video_meta_content_ignores_other_tags() {
        assert_eq!(video_meta_content(PHOTO_PAGE), None);
        assert_eq!(
            video_meta_content(VIDEO_PAGE).as_deref(),
            Some("https://cdn.vxinstagram.com/v/clip.mp4")
        );
    }
}
