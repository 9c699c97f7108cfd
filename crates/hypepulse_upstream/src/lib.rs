//! Upstream service clients for HypePulse.
//!
//! Resolves usernames through the identity service and fetches player, recent
//! game and guild records from the stats service. Lookups go through the
//! shared [`hypepulse_cache::ResultCache`] and transient failures are retried
//! with exponential backoff.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod models;
mod transport;

pub use client::UpstreamClient;
pub use config::{UpstreamConfig, UpstreamConfigBuilder};
pub use models::{
    format_float, format_number, GameModeStats, GuildRecord, PlayerIdentity, PlayerRecord,
    PlayerStats, RecentGame, Scalar, StatValue,
};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
