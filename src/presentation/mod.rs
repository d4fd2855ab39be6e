//! Presentation layer with CLI command handlers.

/// Command handlers.
pub mod commands;

pub use commands::CommandRunner;
