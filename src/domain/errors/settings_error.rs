//! Settings storage error types.

use thiserror::Error;

/// Settings storage error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    ReadFailed(String),

    #[error("failed to write settings: {0}")]
    WriteFailed(String),

    #[error("settings are malformed: {0}")]
    Malformed(String),
}
