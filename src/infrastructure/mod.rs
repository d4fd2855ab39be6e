//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// HTML document adapter.
pub mod document;
/// HTTP client adapters.
pub mod http;
/// Page loading.
pub mod page_source;
/// Feature toggle persistence.
pub mod settings;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use document::{HtmlDocument, extract_message_blocks};
pub use http::ReqwestFetcher;
pub use page_source::{PageError, PageSource};
pub use settings::FileSettingsStore;
