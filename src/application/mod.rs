//! Application layer with resolvers, scanning and rendering.

/// Provider resolvers.
pub mod resolvers;
/// Dispatcher, renderer and rescan scheduling.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use resolvers::{ProviderEndpoints, ProviderResolver, ResolverSet};
pub use services::{EmbedRenderer, LinkDispatcher};
pub use use_cases::{EmbedSession, ManageSettingsUseCase, SessionReport};
