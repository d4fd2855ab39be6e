//! Per-provider feature toggles.

use serde::{Deserialize, Serialize};

use super::ProviderKind;

/// Which providers are embedded. All enabled by default.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureToggles {
    /// Short-form video embeds.
    #[serde(default = "default_true")]
    pub enable_tiktok: bool,

    /// Photo / video post embeds.
    #[serde(default = "default_true")]
    pub enable_instagram: bool,

    /// Long-form video embeds.
    #[serde(default = "default_true")]
    pub enable_youtube: bool,

    /// Microblog embeds.
    #[serde(default = "default_true")]
    pub enable_twitter: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            enable_tiktok: true,
            enable_instagram: true,
            enable_youtube: true,
            enable_twitter: true,
        }
    }
}

impl FeatureToggles {
    /// Returns whether the provider is enabled. `Unknown` is never enabled.
    #[must_use]
    pub const fn is_enabled(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::ShortVideo => self.enable_tiktok,
            ProviderKind::PhotoVideoPost => self.enable_instagram,
            ProviderKind::LongFormVideo => self.enable_youtube,
            ProviderKind::Microblog => self.enable_twitter,
            ProviderKind::Unknown => false,
        }
    }

    /// Sets the toggle for a provider. Ignored for `Unknown`.
    pub fn set(&mut self, kind: ProviderKind, enabled: bool) {
        match kind {
            ProviderKind::ShortVideo => self.enable_tiktok = enabled,
            ProviderKind::PhotoVideoPost => self.enable_instagram = enabled,
            ProviderKind::LongFormVideo => self.enable_youtube = enabled,
            ProviderKind::Microblog => self.enable_twitter = enabled,
            ProviderKind::Unknown => {}
        }
    }

    /// Returns a copy with one provider changed.
    #[must_use]
    pub fn with(mut self, kind: ProviderKind, enabled: bool) -> Self {
        self.set(kind, enabled);
        self
    }
}
