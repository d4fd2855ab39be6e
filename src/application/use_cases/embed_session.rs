//! Embed session: scans, resolutions and rendering over one document.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::services::{
    DebouncedRescan, EmbedRenderer, LinkDispatcher, PendingResolution, Resolution,
};
use crate::domain::entities::FeatureToggles;
use crate::domain::ports::{DocumentRegion, SettingsPort};

/// Counters accumulated over a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Scans performed.
    pub scans: usize,
    /// Links handed to a resolver.
    pub dispatched: usize,
    /// Embeds rendered.
    pub embedded: usize,
    /// Resolutions that produced nothing.
    pub unresolved: usize,
}

/// Owns a document and everything that mutates it.
///
/// All document and script-state mutation happens on the task driving the
/// session; resolutions only produce descriptors.
pub struct EmbedSession<D: DocumentRegion> {
    document: D,
    dispatcher: LinkDispatcher,
    renderer: EmbedRenderer,
    settings: Arc<dyn SettingsPort>,
    in_flight: FuturesUnordered<PendingResolution>,
    rescan: DebouncedRescan,
    report: SessionReport,
}

impl<D: DocumentRegion> EmbedSession<D> {
    /// Creates new session.
    #[must_use]
    pub fn new(
        document: D,
        dispatcher: LinkDispatcher,
        renderer: EmbedRenderer,
        settings: Arc<dyn SettingsPort>,
        debounce: Duration,
    ) -> Self {
        Self {
            document,
            dispatcher,
            renderer,
            settings,
            in_flight: FuturesUnordered::new(),
            rescan: DebouncedRescan::new(debounce),
            report: SessionReport::default(),
        }
    }

    /// Scans the document with a fresh toggles snapshot. Returns the number of
    /// newly dispatched links.
    pub async fn scan(&mut self) -> usize {
        let toggles = match self.settings.get_toggles().await {
            Ok(toggles) => toggles,
            Err(e) => {
                warn!(error = %e, "Failed to read feature toggles, using defaults");
                FeatureToggles::default()
            }
        };

        let pending = self.dispatcher.scan(&mut self.document, &toggles);
        let dispatched = pending.len();
        self.in_flight.extend(pending);

        self.report.scans += 1;
        self.report.dispatched += dispatched;
        debug!(dispatched, in_flight = self.in_flight.len(), "Scan complete");
        dispatched
    }

    /// Drives every in-flight resolution to completion.
    pub async fn settle(&mut self) {
        while let Some(resolution) = self.in_flight.next().await {
            self.complete(resolution);
        }
    }

    /// Scans, then applies region changes as they arrive, rescanning once each
    /// burst of changes goes quiet. Returns when `changes` is closed and nothing
    /// is left in flight.
    pub async fn run(&mut self, mut changes: mpsc::Receiver<String>) -> SessionReport {
        self.scan().await;
        let mut open = true;

        loop {
            if !open && self.in_flight.is_empty() && !self.rescan.is_pending() {
                break;
            }

            let event = tokio::select! {
                change = changes.recv(), if open => SessionEvent::Change(change),
                () = self.rescan.wait(), if self.rescan.is_pending() => SessionEvent::Rescan,
                Some(resolution) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    SessionEvent::Resolved(resolution)
                }
                else => break,
            };

            match event {
                SessionEvent::Change(Some(markup)) => self.apply_change(&markup),
                SessionEvent::Change(None) => open = false,
                SessionEvent::Rescan => {
                    self.scan().await;
                }
                SessionEvent::Resolved(resolution) => self.complete(resolution),
            }
        }

        info!(
            scans = self.report.scans,
            dispatched = self.report.dispatched,
            embedded = self.report.embedded,
            unresolved = self.report.unresolved,
            "Embed session finished"
        );
        self.report
    }

    /// Returns the document.
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// Consumes session and returns the document.
    #[must_use]
    pub fn into_document(self) -> D {
        self.document
    }

    /// Returns counters so far.
    #[must_use]
    pub const fn report(&self) -> SessionReport {
        self.report
    }

    /// Returns number of unresolved in-flight links.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn apply_change(&mut self, markup: &str) {
        match self.document.append_markup(markup) {
            Ok(added) => {
                debug!(added, "Message region changed");
                self.rescan.schedule();
            }
            Err(e) => warn!(error = %e, "Failed to apply region change"),
        }
    }

    fn complete(&mut self, resolution: Resolution) {
        match resolution.outcome {
            Ok(descriptor) => {
                self.renderer
                    .render(&mut self.document, resolution.link, &descriptor);
                self.report.embedded += 1;
            }
            Err(e) => {
                debug!(
                    link = %resolution.link,
                    kind = %resolution.kind,
                    reason = e.kind(),
                    error = %e,
                    "Link left unembedded"
                );
                self.report.unresolved += 1;
            }
        }
    }
}

enum SessionEvent {
    Change(Option<String>),
    Rescan,
    Resolved(Resolution),
}
