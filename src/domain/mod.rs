//! Domain layer with core entities, pure services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// URL classification and pattern extraction.
pub mod services;

pub use entities::{EmbedDescriptor, FeatureToggles, Link, LinkId, ProviderKind};
pub use errors::{FetchError, ResolveError};
pub use ports::{DocumentRegion, FetchPort, SettingsPort};
pub use services::classify;
