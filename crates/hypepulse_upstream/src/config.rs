//! Upstream endpoint and retry configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the identity and stats services live and how hard to try them.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into)]
#[builder(default, setter(into))]
pub struct UpstreamConfig {
    /// Base URL of the username resolution service
    #[serde(default = "default_identity_base_url")]
    identity_base_url: String,

    /// Base URL of the stats service
    #[serde(default = "default_stats_base_url")]
    stats_base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    request_timeout_secs: u64,

    /// Total attempts per call, including the first
    #[serde(default = "default_max_attempts")]
    max_attempts: usize,

    /// Delay before the first retry; doubles on each further retry (milliseconds)
    #[serde(default = "default_retry_base_delay")]
    retry_base_delay_ms: u64,

    /// Upper bound on any single retry delay (seconds)
    #[serde(default = "default_max_retry_delay")]
    max_retry_delay_secs: u64,
}

fn default_identity_base_url() -> String {
    "https://api.mojang.com".to_string()
}

fn default_stats_base_url() -> String {
    "https://api.hypixel.net".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_attempts() -> usize {
    3
}

fn default_retry_base_delay() -> u64 {
    500
}

fn default_max_retry_delay() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            identity_base_url: default_identity_base_url(),
            stats_base_url: default_stats_base_url(),
            request_timeout_secs: default_request_timeout(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay(),
            max_retry_delay_secs: default_max_retry_delay(),
        }
    }
}

impl UpstreamConfig {
    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Delays between attempts: base, 2 x base, 4 x base, ... capped at the
    /// max delay, one fewer than the attempt budget.
    pub fn retry_delays(&self) -> impl Iterator<Item = Duration> {
        use tokio_retry2::strategy::ExponentialBackoff;

        // ExponentialBackoff yields factor * 2^n for a base of 2.
        let unit = (self.retry_base_delay_ms / 2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(unit)
            .max_delay(Duration::from_secs(self.max_retry_delay_secs.max(1)))
            .take(self.max_attempts.max(1) - 1)
    }
}
