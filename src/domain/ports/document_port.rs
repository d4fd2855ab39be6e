//! Document region port definition.

use crate::domain::entities::{EmbedContainer, Link, LinkId};
use crate::domain::errors::DocumentError;

/// Mutable view of the forum message region.
///
/// Implementations are driven from one task; no method is called concurrently.
pub trait DocumentRegion {
    /// Returns anchors of the message region not yet marked processed.
    fn unprocessed_links(&self) -> Vec<Link>;

    /// Marks link processed. Returns `false` if it already was, or is unknown.
    fn mark_processed(&mut self, id: LinkId) -> bool;

    /// Inserts container as the link's next sibling.
    fn insert_after(&mut self, id: LinkId, container: EmbedContainer);

    /// Appends an async external script to the document head.
    fn append_script(&mut self, src: &str);

    /// Appends new message markup. Returns the number of new anchors.
    ///
    /// # Errors
    /// Returns error if the configured region selector is invalid.
    fn append_markup(&mut self, markup: &str) -> Result<usize, DocumentError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory document region for testing.
    #[derive(Debug, Default)]
    pub struct MockDocument {
        links: Vec<Link>,
        /// Containers inserted per link, in insertion order.
        pub inserted: BTreeMap<LinkId, Vec<EmbedContainer>>,
        /// Scripts appended, in order.
        pub scripts: Vec<String>,
    }

    impl MockDocument {
        /// Creates empty document.
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds link with given href and visible text.
        pub fn with_link(mut self, href: &str, text: &str) -> Self {
            self.push_link(href, text);
            self
        }

        /// Adds link and returns its id.
        pub fn push_link(&mut self, href: &str, text: &str) -> LinkId {
            let id = LinkId::new(self.links.len());
            self.links.push(Link::new(id, href, text));
            id
        }

        /// Returns link by id.
        pub fn link(&self, id: LinkId) -> &Link {
            &self.links[id.index()]
        }

        /// Total number of inserted containers.
        pub fn insertion_count(&self) -> usize {
            self.inserted.values().map(Vec::len).sum()
        }
    }

    impl DocumentRegion for MockDocument {
        fn unprocessed_links(&self) -> Vec<Link> {
            self.links
                .iter()
                .filter(|link| !link.is_processed())
                .cloned()
                .collect()
        }

        fn mark_processed(&mut self, id: LinkId) -> bool {
            self.links
                .get_mut(id.index())
                .is_some_and(Link::mark_processed)
        }

        fn insert_after(&mut self, id: LinkId, container: EmbedContainer) {
            self.inserted.entry(id).or_default().push(container);
        }

        fn append_script(&mut self, src: &str) {
            self.scripts.push(src.to_string());
        }

        fn append_markup(&mut self, markup: &str) -> Result<usize, DocumentError> {
            let before = self.links.len();
            for href in markup.split_whitespace() {
                self.push_link(href, href);
            }
            Ok(self.links.len() - before)
        }
    }
}
