//! Anchor link entity.

use std::fmt;

/// Stable handle of an anchor inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl LinkId {
    /// Creates id from its raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// Anchor found in the message region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id: LinkId,
    href: String,
    visible_text: String,
    processed: bool,
}

impl Link {
    /// Creates new unprocessed link.
    #[must_use]
    pub fn new(id: LinkId, href: impl Into<String>, visible_text: impl Into<String>) -> Self {
        Self {
            id,
            href: href.into(),
            visible_text: visible_text.into(),
            processed: false,
        }
    }

    /// Returns link id.
    #[must_use]
    pub const fn id(&self) -> LinkId {
        self.id
    }

    /// Returns absolute target URL.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns the anchor's text content.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        &self.visible_text
    }

    /// Returns whether a resolver was already invoked for this link.
    #[must_use]
    pub const fn is_processed(&self) -> bool {
        self.processed
    }

    /// Sets the processed flag. Returns `false` if it was already set.
    pub fn mark_processed(&mut self) -> bool {
        !std::mem::replace(&mut self.processed, true)
    }

    /// Returns whether the link displays a raw URL rather than custom label text.
    #[must_use]
    pub fn shows_raw_url(&self) -> bool {
        self.visible_text.trim().starts_with("http")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_processed_once() {
        let mut link = Link::new(LinkId::new(0), "https://youtu.be/x", "https://youtu.be/x");
        assert!(link.mark_processed());
        assert!(!link.mark_processed());
        assert!(link.is_processed());
    }

    #[test]
    fn test_label_text_is_not_raw_url() {
        let link = Link::new(LinkId::new(1), "https://youtu.be/x", "click here");
        assert!(!link.shows_raw_url());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let link = Link::new(LinkId::new(2), "https://youtu.be/x", "  https://youtu.be/x\n");
        assert!(link.shows_raw_url());
    }
}
