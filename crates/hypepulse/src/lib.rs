//! HypePulse: Hypixel player statistics for Discord.
//!
//! Slash commands take a Minecraft username, resolve it through the Mojang
//! identity service, fetch the player, guild or recent games from the
//! Hypixel API and answer with formatted text or paginated embeds.
//!
//! # Cargo Features
//!
//! - `discord` - Discord bot integration (default)
//!
//! # Architecture
//!
//! HypePulse is organized as a workspace with focused crates:
//!
//! - `hypepulse_error` - Error types
//! - `hypepulse_cache` - TTL result cache
//! - `hypepulse_upstream` - Identity and stats service client with retries
//! - `hypepulse_format` - Stat formatting and pagination
//! - `hypepulse_social` - Command routing and the Discord adapter
//!
//! This crate (`hypepulse`) re-exports everything for convenience and adds
//! configuration loading and log setup for the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use self::config::{ENV_PREFIX, HypePulseConfig, LoggingConfig};
pub use observability::{ObservabilityConfig, init_observability_with_config};

pub use hypepulse_cache::*;
pub use hypepulse_error::*;
pub use hypepulse_format::*;
pub use hypepulse_social::*;
pub use hypepulse_upstream::*;
