//! Main entry point for the MixHaven bot.

use anyhow::Result;
use clap::Parser;
use mixhaven_bot::MixHavenBot;
use mixhaven_common::init_logging;
use mixhaven_config::ConfigLoader;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    // Dropping the guard stops the file writer, so it lives as long as main.
    let _log_guard = init_logging(&config.logging.to_setup())?;
    info!("Starting MixHaven bot v{}", env!("CARGO_PKG_VERSION"));

    let bot = MixHavenBot::new(config);
    if let Err(e) = bot.start().await {
        error!("Bot stopped with an error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
