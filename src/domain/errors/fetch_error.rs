//! Network fetch error types.

use thiserror::Error;

/// Failure of a single network request.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("invalid request URL: {url}")]
    InvalidUrl { url: String },

    #[error("request timed out")]
    Timeout,

    #[error("failed to connect: {message}")]
    Connect { message: String },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

impl FetchError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}
