use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use jvc_embed::infrastructure::{
    AppConfig, CliArgs, FileSettingsStore, ReqwestFetcher, StorageManager,
};
use jvc_embed::presentation::CommandRunner;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, PathBuf)> {
    let storage = StorageManager::new()?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(args);

    let settings_path = config
        .settings_path
        .clone()
        .unwrap_or_else(|| storage.settings_path());

    Ok((config, settings_path))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, settings_path) = load_config(&args)?;

    init_logging(&config)?;

    info!(version = jvc_embed::VERSION, "Starting jvc-embed");

    let fetch = Arc::new(ReqwestFetcher::new(
        &config.http.user_agent,
        config.http.timeout(),
    )?);
    let settings = Arc::new(FileSettingsStore::new(settings_path));

    let runner = CommandRunner::new(config, fetch, settings);
    let mut stdout = std::io::stdout().lock();
    runner.execute(args.command, &mut stdout).await
}
