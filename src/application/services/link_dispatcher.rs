//! Finds unprocessed qualifying links and routes them to resolvers.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, trace};

use crate::application::resolvers::{ProviderResolver, ResolverSet};
use crate::domain::entities::{EmbedDescriptor, FeatureToggles, Link, LinkId, ProviderKind};
use crate::domain::errors::ResolveError;
use crate::domain::ports::DocumentRegion;
use crate::domain::services::classify;

use std::sync::Arc;

/// Outcome of one dispatched link.
#[derive(Debug)]
pub struct Resolution {
    /// Link the resolution belongs to.
    pub link: LinkId,
    /// Provider that handled it.
    pub kind: ProviderKind,
    /// Descriptor, or the reason none was produced.
    pub outcome: Result<EmbedDescriptor, ResolveError>,
}

/// Single-shot future of one resolution.
pub type PendingResolution = BoxFuture<'static, Resolution>;

/// Routes links to the resolver of their provider.
#[derive(Clone)]
pub struct LinkDispatcher {
    resolvers: ResolverSet,
}

impl LinkDispatcher {
    /// Creates dispatcher over a resolver set.
    #[must_use]
    pub const fn new(resolvers: ResolverSet) -> Self {
        Self { resolvers }
    }

    /// Marks every enabled qualifying link processed and returns its pending resolution.
    ///
    /// Disabled and unknown links stay unprocessed and are reconsidered on the
    /// next scan. Calling this again without new links returns nothing.
    pub fn scan(
        &self,
        region: &mut dyn DocumentRegion,
        toggles: &FeatureToggles,
    ) -> Vec<PendingResolution> {
        let mut pending = Vec::new();

        for link in region.unprocessed_links() {
            if !link.shows_raw_url() {
                trace!(link = %link.id(), "Skipping labelled link");
                continue;
            }

            let kind = classify(link.href());
            if !toggles.is_enabled(kind) {
                continue;
            }
            let Some(resolver) = self.resolvers.for_kind(kind) else {
                continue;
            };

            // Flag before the request is issued so a rescan cannot dispatch twice.
            if !region.mark_processed(link.id()) {
                continue;
            }

            debug!(link = %link.id(), kind = %kind, href = %link.href(), "Dispatching link");
            pending.push(Self::dispatch(resolver, link));
        }

        pending
    }

    fn dispatch(resolver: Arc<dyn ProviderResolver>, link: Link) -> PendingResolution {
        async move {
            let outcome = resolver.resolve(link.href()).await;
            Resolution {
                link: link.id(),
                kind: resolver.kind(),
                outcome,
            }
        }
        .boxed()
    }
}
