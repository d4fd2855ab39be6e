//! Document adapter error types.

use thiserror::Error;

/// Document parsing error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DocumentError {
    #[error("invalid CSS selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}
