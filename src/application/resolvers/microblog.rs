//! Microblog resolver backed by the official oEmbed endpoint.

use std::sync::Arc;

use async_trait::async_trait;

use super::ProviderResolver;
use crate::domain::entities::{EmbedDescriptor, ExternalScript, ProviderKind};
use crate::domain::errors::{FetchError, ResolveError};
use crate::domain::ports::{FetchPort, FetchRequest};

/// Fetches ready-made post markup; the widgets script is injected by the renderer.
pub struct MicroblogResolver {
    fetch: Arc<dyn FetchPort>,
    endpoint: String,
    theme: String,
}

impl MicroblogResolver {
    /// Creates resolver for an oEmbed endpoint.
    #[must_use]
    pub fn new(fetch: Arc<dyn FetchPort>, endpoint: &str, theme: &str) -> Self {
        Self {
            fetch,
            endpoint: endpoint.to_string(),
            theme: theme.to_string(),
        }
    }

    /// Query is form-encoded (`+` for spaces); the endpoint decodes it like
    /// `%20`.
    fn oembed_url(&self, url: &str) -> Result<String, FetchError> {
        let params = [
            ("url", url),
            ("omit_script", "true"),
            ("dnt", "true"),
            ("theme", self.theme.as_str()),
        ];

        url::Url::parse_with_params(&self.endpoint, &params)
            .map(String::from)
            .map_err(|_| FetchError::invalid_url(&self.endpoint))
    }
}

#[async_trait]
impl ProviderResolver for MicroblogResolver {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Microblog
    }

    async fn resolve(&self, url: &str) -> Result<EmbedDescriptor, ResolveError> {
        let request = FetchRequest::get_json(self.oembed_url(url)?);
        let response = self.fetch.request(request).await?;

        if response.status != 200 {
            return Err(ResolveError::UnexpectedStatus {
                status: response.status,
            });
        }

        let html = response
            .json()
            .and_then(|body| body.get("html"))
            .and_then(serde_json::Value::as_str)
            .filter(|html| !html.is_empty())
            .ok_or_else(|| ResolveError::malformed("missing `html` field"))?;

        Ok(EmbedDescriptor::RawMarkup {
            html: html.to_string(),
            external_script: Some(ExternalScript::MicroblogWidgets),
        })
    }
}
