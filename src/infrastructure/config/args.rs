use super::app_config::LogLevel;
use crate::domain::entities::ProviderKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "jvc-embed",
    version,
    about = "Rewrites social-media links in jeuxvideo.com forum pages into inline embeds",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Feature toggle file path.
    #[arg(long, value_name = "PATH", global = true, env = "JVC_EMBED_SETTINGS")]
    pub settings_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite links of a forum page into embeds.
    Embed {
        /// Page file or http(s) URL. Later inputs are appended as new messages.
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Write the rewritten page here instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Base URL for relative links of a page read from disk.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Print the provider of each URL.
    Classify {
        /// URLs to classify.
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },

    /// Show or change which providers are embedded.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SettingsAction {
    /// Print the current toggles.
    Show,
    /// Turn a provider on.
    Enable {
        /// tiktok, instagram, youtube or twitter.
        provider: ProviderKind,
    },
    /// Turn a provider off.
    Disable {
        /// tiktok, instagram, youtube or twitter.
        provider: ProviderKind,
    },
}
