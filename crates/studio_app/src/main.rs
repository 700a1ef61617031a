mod app;
mod commands;
mod config;
mod effects;
mod render;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use studio_logging::{studio_info, studio_warn};

use crate::config::{load_config, DEFAULT_CONFIG_PATH};

/// Prompt-to-video studio in the terminal.
#[derive(Debug, Parser)]
#[command(name = "studio", version, about)]
struct Cli {
    /// Configuration file (RON).
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Directory for history, library and session data.
    #[arg(long)]
    storage_dir: Option<PathBuf>,
    /// Base url of the chat and auth API.
    #[arg(long)]
    api_base: Option<String>,
    /// Base url serving `/Videos/...`.
    #[arg(long)]
    asset_base: Option<String>,
    /// Finish simulated generations in a couple of seconds.
    #[arg(long)]
    fast: bool,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config);
    let mut config = loaded.config;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(asset_base) = cli.asset_base {
        config.asset_base = asset_base;
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    studio_logging::initialize(config.log_destination.into(), level);
    if let Some(warning) = loaded.warning {
        studio_warn!("{}; using defaults", warning);
    }
    studio_info!("Config: {:?}", config);

    app::run(config, cli.fast)
}
