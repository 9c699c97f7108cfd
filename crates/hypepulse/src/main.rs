//! HypePulse Discord bot binary.
//!
//! Loads configuration, wires the cache, upstream client, formatter and
//! router together and serves slash commands until the gateway closes.

use clap::Parser;
use hypepulse::{
    CommandRouter, HypePulseBot, HypePulseConfig, HypePulseHandler, ObservabilityConfig,
    ResultCache, StatFormatter, UpstreamClient, init_observability_with_config,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// HypePulse - Hypixel player statistics for Discord
#[derive(Parser)]
#[command(name = "hypepulse")]
#[command(about = "Discord bot answering Hypixel player statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file used instead of ./hypepulse.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    discord_token: String,

    /// Hypixel API key
    #[arg(long, env = "HYPIXEL_API_KEY", hide_env_values = true)]
    hypixel_api_key: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = HypePulseConfig::load(cli.config.as_deref())?;

    let mut observability = ObservabilityConfig::from(config.logging());
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    if cli.json_logs {
        observability = observability.with_json_logs(true);
    }
    init_observability_with_config(observability)?;

    let cache = Arc::new(ResultCache::new(config.cache().clone()));
    let _sweeper = cache.spawn_sweeper();

    let upstream = UpstreamClient::new(config.upstream().clone(), cli.hypixel_api_key, cache)?;
    let formatter = StatFormatter::new(config.format().clone())?;
    let router = CommandRouter::new(upstream, formatter, *config.pagination());

    let handler = HypePulseHandler::new(Arc::new(router), config.format().icon_url().clone());
    let mut bot = HypePulseBot::new(cli.discord_token, handler).await?;

    info!("Starting HypePulse");
    bot.start().await?;
    Ok(())
}
