//! CLI command handlers.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use crate::application::services::{EmbedRenderer, LinkDispatcher};
use crate::application::{EmbedSession, ManageSettingsUseCase, ResolverSet};
use crate::domain::entities::{FeatureToggles, ProviderKind};
use crate::domain::ports::{FetchPort, SettingsPort};
use crate::domain::services::classify;
use crate::infrastructure::config::{AppConfig, Command, SettingsAction};
use crate::infrastructure::document::{HtmlDocument, extract_message_blocks};
use crate::infrastructure::page_source::PageSource;

/// Later pages waiting to be appended.
const CHANGE_BUFFER: usize = 4;

/// Runs CLI commands against the configured adapters.
pub struct CommandRunner {
    config: AppConfig,
    fetch: Arc<dyn FetchPort>,
    settings: Arc<dyn SettingsPort>,
}

impl CommandRunner {
    /// Creates runner.
    #[must_use]
    pub fn new(
        config: AppConfig,
        fetch: Arc<dyn FetchPort>,
        settings: Arc<dyn SettingsPort>,
    ) -> Self {
        Self {
            config,
            fetch,
            settings,
        }
    }

    /// Executes command, writing its report to `out`.
    ///
    /// # Errors
    /// Returns error if an input cannot be loaded or the output cannot be written.
    pub async fn execute(&self, command: Command, out: &mut dyn Write) -> Result<()> {
        match command {
            Command::Embed {
                inputs,
                output,
                base_url,
            } => self.embed(&inputs, output, base_url.as_deref(), out).await,
            Command::Classify { urls } => {
                write!(out, "{}", classification_report(&urls))?;
                Ok(())
            }
            Command::Settings { action } => self.settings(action, out).await,
        }
    }

    async fn embed(
        &self,
        inputs: &[String],
        output: Option<PathBuf>,
        base_url: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let Some((first, rest)) = inputs.split_first() else {
            return Ok(());
        };

        let source = PageSource::parse(first);
        let page = source
            .load(self.fetch.as_ref())
            .await
            .wrap_err_with(|| format!("Failed to load {source}"))?;

        let base_url = match base_url {
            Some(raw) => Some(Url::parse(raw).wrap_err("Invalid base URL")?),
            None => source.base_url(),
        };

        let document = HtmlDocument::parse(&page, &self.config.scan.link_selector, base_url)?;
        info!(
            page = %source,
            links = document.links().count(),
            "Page loaded"
        );

        let endpoints = self.config.providers.endpoints();
        let dispatcher = LinkDispatcher::new(ResolverSet::new(Arc::clone(&self.fetch), &endpoints));
        let renderer = EmbedRenderer::new(endpoints.widget_script.as_str());
        let mut session = EmbedSession::new(
            document,
            dispatcher,
            renderer,
            Arc::clone(&self.settings),
            self.config.scan.debounce(),
        );

        let (changes, receiver) = mpsc::channel(CHANGE_BUFFER);
        let later: Vec<PageSource> = rest.iter().map(|input| PageSource::parse(input)).collect();
        let (report, ()) = tokio::join!(
            session.run(receiver),
            feed_pages(
                later,
                Arc::clone(&self.fetch),
                &self.config.scan.message_selector,
                changes,
            )
        );

        let html = session.into_document().to_html();
        match output {
            Some(path) => {
                tokio::fs::write(&path, html)
                    .await
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), embedded = report.embedded, "Page written");
            }
            None => out.write_all(html.as_bytes())?,
        }

        Ok(())
    }

    async fn settings(&self, action: SettingsAction, out: &mut dyn Write) -> Result<()> {
        let use_case = ManageSettingsUseCase::new(Arc::clone(&self.settings));

        let toggles = match action {
            SettingsAction::Show => use_case.current().await?,
            SettingsAction::Enable { provider } => use_case.set_enabled(provider, true).await?,
            SettingsAction::Disable { provider } => use_case.set_enabled(provider, false).await?,
        };

        write!(out, "{}", toggles_report(&toggles))?;
        Ok(())
    }
}

/// Loads each page in order and forwards its message blocks as a region change.
async fn feed_pages(
    sources: Vec<PageSource>,
    fetch: Arc<dyn FetchPort>,
    message_selector: &str,
    changes: mpsc::Sender<String>,
) {
    for source in sources {
        let page = match source.load(fetch.as_ref()).await {
            Ok(page) => page,
            Err(e) => {
                warn!(page = %source, error = %e, "Skipping page");
                continue;
            }
        };

        let blocks = match extract_message_blocks(&page, message_selector) {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!(error = %e, "Cannot extract messages from later pages");
                return;
            }
        };

        if blocks.is_empty() {
            debug!(page = %source, "No messages found");
            continue;
        }

        if changes.send(blocks).await.is_err() {
            return;
        }
    }
}

fn classification_report(urls: &[String]) -> String {
    urls.iter()
        .map(|url| format!("{}\t{url}\n", classify(url)))
        .collect()
}

fn toggles_report(toggles: &FeatureToggles) -> String {
    ProviderKind::SUPPORTED
        .iter()
        .map(|&kind| {
            let state = if toggles.is_enabled(kind) { "on" } else { "off" };
            format!("{:<10} {state}\n", kind.platform_name())
        })
        .collect()
}
