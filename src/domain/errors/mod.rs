//! Domain error types.

mod document_error;
mod fetch_error;
mod resolve_error;
mod settings_error;

pub use document_error::DocumentError;
pub use fetch_error::FetchError;
pub use resolve_error::ResolveError;
pub use settings_error::SettingsError;
