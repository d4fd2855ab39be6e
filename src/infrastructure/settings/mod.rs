//! Settings persistence.

mod file_settings_store;

pub use file_settings_store::{FileSettingsStore, SETTINGS_KEY};
