//! Use case implementations.

mod embed_session;
mod manage_settings_use_case;

pub use embed_session::{EmbedSession, SessionReport};
pub use manage_settings_use_case::ManageSettingsUseCase;
