//! Settings port definition.

use async_trait::async_trait;

use crate::domain::entities::FeatureToggles;
use crate::domain::errors::SettingsError;

/// Port for persisted feature toggles.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Returns current toggles, defaults when nothing is stored.
    async fn get_toggles(&self) -> Result<FeatureToggles, SettingsError>;

    /// Persists toggles.
    async fn set_toggles(&self, toggles: FeatureToggles) -> Result<(), SettingsError>;
}
