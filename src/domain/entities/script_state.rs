//! Load state of third-party rendering scripts.

use std::collections::HashSet;

use super::ExternalScript;

/// Tracks which external scripts were injected. Entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct ExternalScriptLoadState {
    loaded: HashSet<ExternalScript>,
}

impl ExternalScriptLoadState {
    /// Creates state with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the script was already injected.
    #[must_use]
    pub fn is_loaded(&self, script: ExternalScript) -> bool {
        self.loaded.contains(&script)
    }

    /// Marks the script as injected. Returns `true` only on the first call.
    pub fn mark_loaded(&mut self, script: ExternalScript) -> bool {
        self.loaded.insert(script)
    }
}
