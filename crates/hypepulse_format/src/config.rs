//! Formatter and pagination settings.

use crate::PaginationTier;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page size limits and embed decoration.
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
pub struct FormatConfig {
    /// Text views longer than this many characters are paginated
    #[serde(default = "default_overflow_page_length")]
    overflow_page_length: usize,

    /// Maximum characters per detailed-view page
    #[serde(default = "default_detailed_page_length")]
    detailed_page_length: usize,

    /// Thumbnail shown on every embed
    #[serde(default = "default_icon_url")]
    icon_url: String,
}

fn default_overflow_page_length() -> usize {
    3500
}

fn default_detailed_page_length() -> usize {
    4000
}

fn default_icon_url() -> String {
    "https://packshq.com/assets/img/hsbr.jpg".to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            overflow_page_length: default_overflow_page_length(),
            detailed_page_length: default_detailed_page_length(),
            icon_url: default_icon_url(),
        }
    }
}

/// Inactivity timeouts for paginated replies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct PaginationConfig {
    /// Timeout for the detailed view (milliseconds)
    #[serde(default = "default_detailed_timeout")]
    detailed_timeout_ms: u64,

    /// Timeout for overflowing text views (milliseconds)
    #[serde(default = "default_overflow_timeout")]
    overflow_timeout_ms: u64,
}

fn default_detailed_timeout() -> u64 {
    180_000
}

fn default_overflow_timeout() -> u64 {
    120_000
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            detailed_timeout_ms: default_detailed_timeout(),
            overflow_timeout_ms: default_overflow_timeout(),
        }
    }
}

impl PaginationConfig {
    /// Inactivity timeout for a tier.
    pub fn timeout_for(&self, tier: PaginationTier) -> Duration {
        match tier {
            PaginationTier::Detailed => Duration::from_millis(self.detailed_timeout_ms),
            PaginationTier::Overflow => Duration::from_millis(self.overflow_timeout_ms),
        }
    }
}
