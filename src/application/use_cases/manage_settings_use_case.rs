//! Feature toggle management use case.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{FeatureToggles, ProviderKind};
use crate::domain::errors::SettingsError;
use crate::domain::ports::SettingsPort;

/// Reads and updates persisted feature toggles.
pub struct ManageSettingsUseCase {
    settings: Arc<dyn SettingsPort>,
}

impl ManageSettingsUseCase {
    /// Creates use case.
    #[must_use]
    pub const fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    /// Returns current toggles.
    ///
    /// # Errors
    /// Returns error if the settings cannot be read.
    pub async fn current(&self) -> Result<FeatureToggles, SettingsError> {
        self.settings.get_toggles().await
    }

    /// Enables or disables one provider and persists the result.
    ///
    /// # Errors
    /// Returns error if the settings cannot be read or written.
    pub async fn set_enabled(
        &self,
        kind: ProviderKind,
        enabled: bool,
    ) -> Result<FeatureToggles, SettingsError> {
        let toggles = self.settings.get_toggles().await?.with(kind, enabled);
        self.settings.set_toggles(toggles).await?;
        info!(provider = %kind, enabled, "Feature toggle updated");
        Ok(toggles)
    }
}
