//! jvc-embed - Inline embeds for jeuxvideo.com forum pages.
//!
//! This crate turns raw social-media links in forum messages into embedded
//! players and posts, with clean architecture: pure classification and
//! rendering in the domain, provider resolvers and the scan session in the
//! application layer, and HTTP, HTML and file adapters in infrastructure.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing resolvers, services and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing CLI command handlers.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "jvc-embed";
