//! Resolution failure taxonomy.
//!
//! None of these are fatal; a failed resolution leaves the link unembedded.

use thiserror::Error;

use super::FetchError;

/// Reason a resolver produced no embed descriptor.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("{expected} not found in {url}")]
    PatternMismatch { expected: &'static str, url: String },

    #[error("network failure: {0}")]
    Network(#[from] FetchError),

    #[error("unexpected response status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl ResolveError {
    /// Creates pattern mismatch error.
    #[must_use]
    pub fn pattern(expected: &'static str, url: impl Into<String>) -> Self {
        Self::PatternMismatch {
            expected,
            url: url.into(),
        }
    }

    /// Creates malformed response error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Short label used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::Network(_) => "network_failure",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}
