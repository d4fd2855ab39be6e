//! Feature toggles persisted in a TOML file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::FeatureToggles;
use crate::domain::errors::SettingsError;
use crate::domain::ports::SettingsPort;
use crate::infrastructure::config::storage::save_to_file;

/// Versioned key the toggles are stored under.
pub const SETTINGS_KEY: &str = "jvcEmbedSettings_v1.0";

/// Settings store keeping toggles under [`SETTINGS_KEY`] in a TOML file.
///
/// Other keys in the file are left untouched on write.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates store for the given file. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_table(&self) -> Result<toml::Table, SettingsError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SettingsError::ReadFailed(e.to_string()))?;

        toml::from_str(&content).map_err(|e| SettingsError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SettingsPort for FileSettingsStore {
    async fn get_toggles(&self) -> Result<FeatureToggles, SettingsError> {
        let table = self.load_table().await?;
        let Some(value) = table.get(SETTINGS_KEY) else {
            debug!(path = ?self.path, "No stored toggles, using defaults");
            return Ok(FeatureToggles::default());
        };

        match value.clone().try_into::<FeatureToggles>() {
            Ok(toggles) => Ok(toggles),
            Err(e) => {
                warn!(error = %e, "Stored toggles are malformed. Using defaults.");
                Ok(FeatureToggles::default())
            }
        }
    }

    async fn set_toggles(&self, toggles: FeatureToggles) -> Result<(), SettingsError> {
        let mut table = match self.load_table().await {
            Ok(table) => table,
            Err(SettingsError::Malformed(reason)) => {
                warn!(%reason, "Settings file is malformed, rewriting it");
                toml::Table::new()
            }
            Err(e) => return Err(e),
        };

        let value = toml::Value::try_from(toggles)
            .map_err(|e| SettingsError::WriteFailed(e.to_string()))?;
        table.insert(SETTINGS_KEY.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SettingsError::WriteFailed(e.to_string()))?;
        }

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || save_to_file(&path, &table))
            .await
            .map_err(|e| SettingsError::WriteFailed(e.to_string()))?
            .map_err(|e| SettingsError::WriteFailed(e.to_string()))?;

        debug!(path = ?self.path, "Toggles saved");
        Ok(())
    }
}
