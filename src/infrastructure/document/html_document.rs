//! Forum page backed by a parsed HTML tree.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::serializer::Serializer;
use crate::domain::entities::{EmbedContainer, Link, LinkId};
use crate::domain::errors::DocumentError;
use crate::domain::ports::DocumentRegion;

/// Selector matching anchors inside forum messages.
pub const DEFAULT_LINK_SELECTOR: &str = ".bloc-message-forum .txt-msg a";

/// Selector matching whole forum message blocks.
pub const DEFAULT_MESSAGE_SELECTOR: &str = ".bloc-message-forum";

/// Attribute written on anchors once they have been handed to a resolver.
pub const PROCESSED_ATTRIBUTE: &str = "data-processed";

pub(super) struct LinkRecord {
    pub(super) link: Link,
    pub(super) embeds: Vec<EmbedContainer>,
}

/// Parsed forum page plus markup appended after load.
///
/// The tree itself is never mutated. Embeds and processed markers are kept
/// alongside it and applied when the page is written back out.
pub struct HtmlDocument {
    selector: Selector,
    base_url: Option<Url>,
    segments: Vec<Html>,
    anchors: HashMap<(usize, NodeId), LinkId>,
    links: Vec<LinkRecord>,
    scripts: Vec<String>,
}

fn parse_selector(selector: &str) -> Result<Selector, DocumentError> {
    Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

impl HtmlDocument {
    /// Parses a full page and indexes the anchors matching `link_selector`.
    ///
    /// Relative hrefs are resolved against `base_url` when one is given.
    ///
    /// # Errors
    /// Returns error if `link_selector` is not a valid CSS selector.
    pub fn parse(
        page: &str,
        link_selector: &str,
        base_url: Option<Url>,
    ) -> Result<Self, DocumentError> {
        let mut document = Self {
            selector: parse_selector(link_selector)?,
            base_url,
            segments: vec![Html::parse_document(page)],
            anchors: HashMap::new(),
            links: Vec::new(),
            scripts: Vec::new(),
        };
        let found = document.index_segment(0);
        debug!(links = found, "Indexed page anchors");
        Ok(document)
    }

    fn index_segment(&mut self, segment: usize) -> usize {
        let matches: Vec<(NodeId, String, String, bool)> = self.segments[segment]
            .select(&self.selector)
            .map(|anchor| {
                let href = anchor.value().attr("href").unwrap_or_default();
                (
                    anchor.id(),
                    self.absolute_href(href),
                    anchor.text().collect::<String>(),
                    anchor.value().attr(PROCESSED_ATTRIBUTE).is_some(),
                )
            })
            .collect();

        let found = matches.len();
        for (node, href, text, already_processed) in matches {
            let id = LinkId::new(self.links.len());
            let mut link = Link::new(id, href, text);
            if already_processed {
                link.mark_processed();
            }
            self.anchors.insert((segment, node), id);
            self.links.push(LinkRecord {
                link,
                embeds: Vec::new(),
            });
        }
        found
    }

    fn absolute_href(&self, href: &str) -> String {
        match &self.base_url {
            Some(base) => base
                .join(href)
                .map_or_else(|_| href.to_string(), |url| url.to_string()),
            None => href.to_string(),
        }
    }

    /// All indexed links, in document order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().map(|record| &record.link)
    }

    /// Total number of inserted containers.
    #[must_use]
    pub fn embed_count(&self) -> usize {
        self.links.iter().map(|record| record.embeds.len()).sum()
    }

    /// External scripts appended so far.
    #[must_use]
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Writes the page back out with every embed applied.
    #[must_use]
    pub fn to_html(&self) -> String {
        Serializer::new(self).finish()
    }

    pub(super) fn segments(&self) -> &[Html] {
        &self.segments
    }

    pub(super) fn record_at(&self, segment: usize, node: NodeId) -> Option<&LinkRecord> {
        self.anchors
            .get(&(segment, node))
            .and_then(|id| self.links.get(id.index()))
    }
}

impl DocumentRegion for HtmlDocument {
    fn unprocessed_links(&self) -> Vec<Link> {
        self.links
            .iter()
            .filter(|record| !record.link.is_processed())
            .map(|record| record.link.clone())
            .collect()
    }

    fn mark_processed(&mut self, id: LinkId) -> bool {
        self.links
            .get_mut(id.index())
            .is_some_and(|record| record.link.mark_processed())
    }

    fn insert_after(&mut self, id: LinkId, container: EmbedContainer) {
        match self.links.get_mut(id.index()) {
            Some(record) => record.embeds.push(container),
            None => warn!(link = %id, "Embed target is not part of this document"),
        }
    }

    fn append_script(&mut self, src: &str) {
        self.scripts.push(src.to_string());
    }

    fn append_markup(&mut self, markup: &str) -> Result<usize, DocumentError> {
        self.segments.push(Html::parse_fragment(markup));
        let found = self.index_segment(self.segments.len() - 1);
        debug!(links = found, "Indexed appended markup");
        Ok(found)
    }
}

/// Returns the outer HTML of every message block in `page`, concatenated.
///
/// # Errors
/// Returns error if `message_selector` is not a valid CSS selector.
pub fn extract_message_blocks(page: &str, message_selector: &str) -> Result<String, DocumentError> {
    let selector = parse_selector(message_selector)?;
    let html = Html::parse_document(page);
    Ok(html.select(&selector).map(|block| block.html()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SizingClass;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Topic</title></head><body>
<div class="bloc-message-forum"><div class="txt-msg"><p>look <a href="https://youtu.be/dQw4w9WgXcQ">https://youtu.be/dQw4w9WgXcQ</a> here</p></div></div>
<div class="sidebar"><a href="https://youtu.be/aaaaaaaaaaa">https://youtu.be/aaaaaaaaaaa</a></div>
</body></html>"#;

    fn document() -> HtmlDocument {
        HtmlDocument::parse(PAGE, DEFAULT_LINK_SELECTOR, None).unwrap()
    }

    #[test]
    fn test_only_message_anchors_are_indexed() {
        let doc = document();
        let links: Vec<_> = doc.links().map(Link::href).collect();
        assert_eq!(links, vec!["https://youtu.be/dQw4w9WgXcQ"]);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let result = HtmlDocument::parse(PAGE, "a[", None);
        assert!(matches!(result, Err(DocumentError::InvalidSelector { .. })));
    }

    #[test]
    fn test_relative_hrefs_resolve_against_base() {
        let page = r#"<div class="bloc-message-forum"><div class="txt-msg"><a href="/forums/1.htm">http</a></div></div>"#;
        let base = Url::parse("https://www.jeuxvideo.com/forums/").unwrap();
        let doc = HtmlDocument::parse(page, DEFAULT_LINK_SELECTOR, Some(base)).unwrap();
        assert_eq!(
            doc.links().next().map(Link::href),
            Some("https://www.jeuxvideo.com/forums/1.htm")
        );
    }

    #[test]
    fn test_marked_anchors_start_processed() {
        let page = r#"<div class="bloc-message-forum"><div class="txt-msg"><a href="https://x.com/a/status/1" data-processed="true">https://x.com/a/status/1</a></div></div>"#;
        let doc = HtmlDocument::parse(page, DEFAULT_LINK_SELECTOR, None).unwrap();
        assert!(doc.unprocessed_links().is_empty());
    }

    #[test]
    fn test_mark_processed_is_one_shot() {
        let mut doc = document();
        let id = doc.unprocessed_links()[0].id();

        assert!(doc.mark_processed(id));
        assert!(!doc.mark_processed(id));
        assert!(doc.unprocessed_links().is_empty());
        assert!(doc.to_html().contains(r#"data-processed="true""#));
    }

    #[test]
    fn test_container_follows_its_anchor() {
        let mut doc = document();
        let id = doc.unprocessed_links()[0].id();
        doc.insert_after(id, EmbedContainer::new(SizingClass::Widescreen, "<iframe></iframe>"));

        let html = doc.to_html();
        let anchor_end = html.find("dQw4w9WgXcQ</a>").unwrap();
        let container = html.find("jvc-embed-container ratio-16-9").unwrap();
        let trailing = html.find(" here</p>").unwrap();
        assert!(anchor_end < container && container < trailing);
        assert_eq!(doc.embed_count(), 1);
    }

    #[test]
    fn test_script_lands_in_head() {
        let mut doc = document();
        doc.append_script("https://platform.twitter.com/widgets.js");

        let html = doc.to_html();
        let script = html
            .find(r#"<script src="https://platform.twitter.com/widgets.js" async></script>"#)
            .unwrap();
        assert!(script < html.find("</head>").unwrap());
    }

    #[test]
    fn test_appended_markup_is_indexed_and_written_into_body() {
        let mut doc = document();
        let added = doc
            .append_markup(r#"<div class="bloc-message-forum"><div class="txt-msg"><a href="https://www.tiktok.com/@u/video/1">https://www.tiktok.com/@u/video/1</a></div></div>"#)
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(doc.unprocessed_links().len(), 2);
        let html = doc.to_html();
        let appended = html.find("@u/video/1").unwrap();
        assert!(appended < html.find("</body>").unwrap());
        assert!(!html[html.find("<body>").unwrap()..].contains("<html>"));
    }

    #[test]
    fn test_untouched_page_keeps_text_and_entities() {
        let page = r#"<div class="bloc-message-forum"><div class="txt-msg"><p>a &amp; b &lt;c&gt;</p></div></div>"#;
        let doc = HtmlDocument::parse(page, DEFAULT_LINK_SELECTOR, None).unwrap();
        assert!(doc.to_html().contains("<p>a &amp; b &lt;c&gt;</p>"));
    }

    #[test]
    fn test_extract_message_blocks_skips_page_chrome() {
        let blocks = extract_message_blocks(PAGE, DEFAULT_MESSAGE_SELECTOR).unwrap();
        assert!(blocks.starts_with(r#"<div class="bloc-message-forum">"#));
        assert!(blocks.contains("dQw4w9WgXcQ"));
        assert!(!blocks.contains("sidebar"));
    }
}
