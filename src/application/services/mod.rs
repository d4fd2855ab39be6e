//! Application services.

pub mod embed_renderer;
pub mod link_dispatcher;
pub mod rescan;

pub use embed_renderer::EmbedRenderer;
pub use link_dispatcher::{LinkDispatcher, PendingResolution, Resolution};
pub use rescan::DebouncedRescan;
