//! Provider resolvers.
//!
//! Each resolver turns a classified URL into at most one [`EmbedDescriptor`],
//! with at most one network round trip.

mod long_form_video;
mod microblog;
mod photo_video_post;
mod short_video;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{EmbedDescriptor, ProviderKind};
use crate::domain::errors::ResolveError;
use crate::domain::ports::FetchPort;

pub use long_form_video::LongFormVideoResolver;
pub use microblog::MicroblogResolver;
pub use photo_video_post::PhotoVideoPostResolver;
pub use short_video::ShortVideoResolver;

/// Resolves links of one provider.
#[async_trait]
pub trait ProviderResolver: Send + Sync {
    /// Provider handled by this resolver.
    fn kind(&self) -> ProviderKind;

    /// Produces the embed descriptor for a URL of this provider.
    async fn resolve(&self, url: &str) -> Result<EmbedDescriptor, ResolveError>;
}

/// Third-party endpoints and constants used by the resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// Base of short video embed pages; the id is appended.
    pub short_video_embed_base: String,
    /// Base of long form video embed pages; the id is appended.
    pub long_form_embed_base: String,
    /// Mirror host exposing post metadata.
    pub mirror_host: String,
    /// Referrer passed to the official post embed.
    pub post_embed_referrer: String,
    /// oEmbed endpoint for microblog posts.
    pub oembed_endpoint: String,
    /// oEmbed theme.
    pub oembed_theme: String,
    /// Script that hydrates microblog markup.
    pub widget_script: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            short_video_embed_base: "https://www.tiktok.com/embed/v2".to_string(),
            long_form_embed_base: "https://www.youtube.com/embed".to_string(),
            mirror_host: "vxinstagram.com".to_string(),
            post_embed_referrer: "https://www.jeuxvideo.com".to_string(),
            oembed_endpoint: "https://publish.twitter.com/oembed".to_string(),
            oembed_theme: "dark".to_string(),
            widget_script: "https://platform.twitter.com/widgets.js".to_string(),
        }
    }
}

/// One resolver per supported provider.
#[derive(Clone)]
pub struct ResolverSet {
    short_video: Arc<dyn ProviderResolver>,
    photo_video_post: Arc<dyn ProviderResolver>,
    long_form_video: Arc<dyn ProviderResolver>,
    microblog: Arc<dyn ProviderResolver>,
}

impl ResolverSet {
    /// Creates the standard resolvers sharing one fetcher.
    #[must_use]
    pub fn new(fetch: Arc<dyn FetchPort>, endpoints: &ProviderEndpoints) -> Self {
        Self {
            short_video: Arc::new(ShortVideoResolver::new(
                Arc::clone(&fetch),
                &endpoints.short_video_embed_base,
            )),
            photo_video_post: Arc::new(PhotoVideoPostResolver::new(
                Arc::clone(&fetch),
                &endpoints.mirror_host,
                &endpoints.post_embed_referrer,
            )),
            long_form_video: Arc::new(LongFormVideoResolver::new(
                &endpoints.long_form_embed_base,
            )),
            microblog: Arc::new(MicroblogResolver::new(
                fetch,
                &endpoints.oembed_endpoint,
                &endpoints.oembed_theme,
            )),
        }
    }

    /// Returns resolver for the provider, `None` for `Unknown`.
    #[must_use]
    pub fn for_kind(&self, kind: ProviderKind) -> Option<Arc<dyn ProviderResolver>> {
        let resolver = match kind {
            ProviderKind::ShortVideo => &self.short_video,
            ProviderKind::PhotoVideoPost => &self.photo_video_post,
            ProviderKind::LongFormVideo => &self.long_form_video,
            ProviderKind::Microblog => &self.microblog,
            ProviderKind::Unknown => return None,
        };
        Some(Arc::clone(resolver))
    }
}
