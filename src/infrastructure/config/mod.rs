//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, HttpConfig, LogLevel, ProvidersConfig, ScanConfig};
pub use args::{CliArgs, Command, SettingsAction};
pub use storage::{ConfigError, StorageManager};
