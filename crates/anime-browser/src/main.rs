//! Anime Browser CLI application.

use anime_browser::{run, App};
use anyhow::{Context, Result};
use clap::Parser;
use jikan_client::JikanClient;
use shared::{Config, FavoritesStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

/// Browse the top anime on MyAnimeList and keep a session favorites list
#[derive(Parser, Debug)]
#[command(name = "anime-browser")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Number of top anime to fetch (overrides the config file)
    #[arg(short, long)]
    limit: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };
    shared::logging::init(shared::logging::from_config(
        &config,
        "anime-browser",
        log_level,
    ))?;

    info!("Anime Browser starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    let client = JikanClient::new(&config.jikan).context("Failed to create Jikan client")?;
    let limit = args.limit.unwrap_or(config.jikan.top_limit);
    info!(base_url = %client.base_url(), limit = limit, "Jikan client ready");

    let mut app = App::new(Arc::new(client), limit, FavoritesStore::new());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    run(&mut app, stdin, &mut stdout).await?;

    info!("Anime Browser finished");
    Ok(())
}
