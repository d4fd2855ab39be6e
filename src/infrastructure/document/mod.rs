//! HTML document adapter.

mod html_document;
mod serializer;

pub use html_document::{
    DEFAULT_LINK_SELECTOR, DEFAULT_MESSAGE_SELECTOR, HtmlDocument, PROCESSED_ATTRIBUTE,
    extract_message_blocks,
};
