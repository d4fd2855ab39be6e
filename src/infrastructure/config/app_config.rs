//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::ProviderEndpoints;
use crate::infrastructure::document::{DEFAULT_LINK_SELECTOR, DEFAULT_MESSAGE_SELECTOR};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Feature toggle file path.
    #[serde(skip)]
    pub settings_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Link scanning.
    #[serde(default)]
    pub scan: ScanConfig,

    /// HTTP client.
    #[serde(default)]
    pub http: HttpConfig,

    /// Third-party endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Link scanning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Anchors considered for embedding.
    #[serde(default = "default_link_selector")]
    pub link_selector: String,

    /// Message blocks taken from later pages.
    #[serde(default = "default_message_selector")]
    pub message_selector: String,

    /// Quiet period before a rescan after the page changes.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl ScanConfig {
    /// Rescan debounce as a duration.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            link_selector: default_link_selector(),
            message_selector: default_message_selector(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Request timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Provider endpoint overrides. Unset fields keep the built-in endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Base of short video embed pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_video_embed_base: Option<String>,
    /// Base of long form video embed pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_form_embed_base: Option<String>,
    /// Mirror host exposing post metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_host: Option<String>,
    /// Referrer passed to the official post embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_embed_referrer: Option<String>,
    /// Microblog oEmbed endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed_endpoint: Option<String>,
    /// Microblog oEmbed theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed_theme: Option<String>,
    /// Script hydrating microblog markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_script: Option<String>,
}

impl ProvidersConfig {
    /// Applies overrides on top of the built-in endpoints.
    #[must_use]
    pub fn endpoints(&self) -> ProviderEndpoints {
        let defaults = ProviderEndpoints::default();
        let pick = |value: Option<&String>, fallback: String| value.cloned().unwrap_or(fallback);
        ProviderEndpoints {
            short_video_embed_base: pick(
                self.short_video_embed_base.as_ref(),
                defaults.short_video_embed_base,
            ),
            long_form_embed_base: pick(
                self.long_form_embed_base.as_ref(),
                defaults.long_form_embed_base,
            ),
            mirror_host: pick(self.mirror_host.as_ref(), defaults.mirror_host),
            post_embed_referrer: pick(
                self.post_embed_referrer.as_ref(),
                defaults.post_embed_referrer,
            ),
            oembed_endpoint: pick(self.oembed_endpoint.as_ref(), defaults.oembed_endpoint),
            oembed_theme: pick(self.oembed_theme.as_ref(), defaults.oembed_theme),
            widget_script: pick(self.widget_script.as_ref(), defaults.widget_script),
        }
    }
}

fn default_link_selector() -> String {
    DEFAULT_LINK_SELECTOR.to_string()
}

fn default_message_selector() -> String {
    DEFAULT_MESSAGE_SELECTOR.to_string()
}

const fn default_debounce_ms() -> u64 {
    250
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

const fn default_timeout_secs() -> u64 {
    15
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(settings_path) = &args.settings_path {
            self.settings_path = Some(settings_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }
}
