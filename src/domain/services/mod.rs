//! Pure domain services.

pub mod classifier;
pub mod url_patterns;

pub use classifier::classify;
