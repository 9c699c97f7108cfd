//! Upstream result cache implementation.

use derive_getters::Getters;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Kind of upstream result stored in the cache.
///
/// Each category has its own default TTL and key normalisation rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CacheCategory {
    /// Username to UUID resolutions, keyed by case-folded username.
    Identity,
    /// Player records, keyed by UUID.
    Player,
    /// Guild records, keyed by member UUID.
    Guild,
    /// Recent games lists, keyed by UUID.
    RecentGames,
}

impl CacheCategory {
    /// Normalise a lookup key for this category.
    ///
    /// Usernames are case-insensitive upstream, so identity keys are folded to
    /// lowercase. Identifiers are opaque and used verbatim.
    ///
    /// ```
    /// use hypepulse_cache::CacheCategory;
    ///
    /// assert_eq!(CacheCategory::Identity.normalize_key(" Notch "), "notch");
    /// assert_eq!(CacheCategory::Player.normalize_key("069A79f4"), "069A79f4");
    /// ```
    pub fn normalize_key(&self, key: &str) -> String {
        match self {
            Self::Identity => key.trim().to_lowercase(),
            Self::Player | Self::Guild | Self::RecentGames => key.to_string(),
        }
    }
}

/// Cache entry with value and expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: JsonValue,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    category: CacheCategory,
    key: String,
}

impl CacheKey {
    fn new(category: CacheCategory, key: &str) -> Self {
        Self {
            category,
            key: category.normalize_key(key),
        }
    }
}

/// Configuration for the result cache.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct ResultCacheConfig {
    /// TTL for username resolutions (seconds)
    #[serde(default = "default_record_ttl")]
    identity_ttl_secs: u64,

    /// TTL for player records (seconds)
    #[serde(default = "default_record_ttl")]
    player_ttl_secs: u64,

    /// TTL for guild records (seconds)
    #[serde(default = "default_record_ttl")]
    guild_ttl_secs: u64,

    /// TTL for recent games, which track live sessions (seconds)
    #[serde(default = "default_recent_games_ttl")]
    recent_games_ttl_secs: u64,

    /// Maximum cache size (number of entries, 0 stores nothing)
    #[serde(default = "default_max_size")]
    max_size: usize,

    /// Interval of the background expiry sweep (seconds, 0 disables it)
    #[serde(default = "default_sweep_interval")]
    sweep_interval_secs: u64,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_record_ttl() -> u64 {
    300 // 5 minutes
}

fn default_recent_games_ttl() -> u64 {
    60
}

fn default_max_size() -> usize {
    1000
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_enabled() -> bool {
    true
}

impl Default for ResultCacheConfig {
    fn default() -> Self {
        Self {
            identity_ttl_secs: default_record_ttl(),
            player_ttl_secs: default_record_ttl(),
            guild_ttl_secs: default_record_ttl(),
            recent_games_ttl_secs: default_recent_games_ttl(),
            max_size: default_max_size(),
            sweep_interval_secs: default_sweep_interval(),
            enabled: default_enabled(),
        }
    }
}

impl ResultCacheConfig {
    /// Default TTL for a category.
    pub fn ttl_for(&self, category: CacheCategory) -> Duration {
        let secs = match category {
            CacheCategory::Identity => self.identity_ttl_secs,
            CacheCategory::Player => self.player_ttl_secs,
            CacheCategory::Guild => self.guild_ttl_secs,
            CacheCategory::RecentGames => self.recent_games_ttl_secs,
        };
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    access_order: Vec<CacheKey>,
}

impl CacheState {
    fn forget(&mut self, key: &CacheKey) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    fn touch(&mut self, key: &CacheKey) {
        self.forget(key);
        self.access_order.push(key.clone());
    }

    fn evict_lru(&mut self) {
        if self.access_order.is_empty() {
            return;
        }
        let key = self.access_order.remove(0);
        tracing::debug!(
            category = %key.category,
            key = %key.key,
            "Evicting LRU entry"
        );
        self.entries.remove(&key);
    }
}

/// Time-bounded cache for upstream results.
///
/// Values are stored as raw JSON under `(category, normalised key)`. Expiry is
/// checked lazily on read; [`ResultCache::cleanup_expired`] and the optional
/// sweep task bound memory. The cache is shared between concurrent commands
/// behind an `Arc`; the internal lock is only held for the map operation, so
/// concurrent misses for the same key may both reach the upstream and the
/// last writer wins.
///
/// # Example
///
/// ```
/// use hypepulse_cache::{CacheCategory, ResultCache, ResultCacheConfig};
/// use serde_json::json;
///
/// let cache = ResultCache::new(ResultCacheConfig::default());
///
/// cache.set(CacheCategory::Identity, "Notch", json!({"id": "069a79f4"}), None);
///
/// // Username keys are case-insensitive
/// let hit = cache.get(CacheCategory::Identity, "notch").unwrap();
/// assert_eq!(hit["id"], "069a79f4");
/// ```
#[derive(Debug)]
pub struct ResultCache {
    config: ResultCacheConfig,
    state: Mutex<CacheState>,
}

impl ResultCache {
    /// Create a new result cache with configuration.
    pub fn new(config: ResultCacheConfig) -> Self {
        tracing::debug!(
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new ResultCache"
        );
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &ResultCacheConfig {
        &self.config
    }

    /// Store a value.
    ///
    /// # Arguments
    ///
    /// * `category` - Kind of result
    /// * `key` - Username or identifier, normalised per category
    /// * `value` - Raw upstream payload
    /// * `ttl_override` - TTL for this entry (category default if None)
    #[tracing::instrument(skip(self, value))]
    pub fn set(
        &self,
        category: CacheCategory,
        key: &str,
        value: JsonValue,
        ttl_override: Option<Duration>,
    ) {
        if !self.config.enabled || self.config.max_size == 0 {
            tracing::debug!("Cache disabled, skipping set");
            return;
        }

        let key = CacheKey::new(category, key);
        let ttl = ttl_override.unwrap_or_else(|| self.config.ttl_for(category));
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl,
        };

        let mut state = self.state.lock();

        // Evict if at capacity
        if state.entries.len() >= self.config.max_size && !state.entries.contains_key(&key) {
            state.evict_lru();
        }

        state.touch(&key);
        let replaced = state.entries.insert(key, entry).is_some();

        tracing::debug!(ttl = ?ttl, replaced, "Stored entry in cache");
    }

    /// Get a cached value.
    ///
    /// Returns None if the entry doesn't exist, is expired (and is evicted),
    /// or the cache is disabled.
    #[tracing::instrument(skip(self))]
    pub fn get(&self, category: CacheCategory, key: &str) -> Option<JsonValue> {
        if !self.config.enabled {
            return None;
        }

        let key = CacheKey::new(category, key);
        let mut state = self.state.lock();

        let entry = state.entries.get(&key)?;
        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            state.entries.remove(&key);
            state.forget(&key);
            return None;
        }

        let value = entry.value.clone();
        let remaining = entry.time_remaining();
        state.touch(&key);

        tracing::debug!(time_remaining = ?remaining, "Cache hit");
        Some(value)
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&self) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();

        let expired: Vec<CacheKey> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            state.entries.remove(key);
            state.forget(key);
        }

        let removed = before - state.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = state.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Spawn the periodic expiry sweep.
    ///
    /// Returns None when the sweep interval is zero. The task holds only a weak
    /// reference and stops once the cache is dropped. Must be called from
    /// within a Tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let secs = self.config.sweep_interval_secs;
        if secs == 0 {
            return None;
        }
        let period = Duration::from_secs(secs);
        let weak: Weak<Self> = Arc::downgrade(self);

        tracing::debug!(period = ?period, "Starting cache sweeper");
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match weak.upgrade() {
                    Some(cache) => {
                        cache.cleanup_expired();
                    }
                    None => {
                        tracing::debug!("Cache dropped, stopping sweeper");
                        break;
                    }
                }
            }
        }))
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(ResultCacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_ttls() {
        let config = ResultCacheConfig::default();
        assert_eq!(config.ttl_for(CacheCategory::Identity), Duration::from_secs(300));
        assert_eq!(config.ttl_for(CacheCategory::Player), Duration::from_secs(300));
        assert_eq!(config.ttl_for(CacheCategory::Guild), Duration::from_secs(300));
        assert_eq!(config.ttl_for(CacheCategory::RecentGames), Duration::from_secs(60));
    }

    #[test]
    fn test_recent_games_ttl_is_shortest() {
        let config = ResultCacheConfig::default();
        let recent = config.ttl_for(CacheCategory::RecentGames);
        for category in CacheCategory::iter() {
            assert!(config.ttl_for(category) >= recent);
        }
    }

    #[test]
    fn test_categories_do_not_collide() {
        let cache = ResultCache::default();
        cache.set(CacheCategory::Player, "abc", serde_json::json!("player"), None);
        cache.set(CacheCategory::Guild, "abc", serde_json::json!("guild"), None);

        assert_eq!(cache.get(CacheCategory::Player, "abc").unwrap(), "player");
        assert_eq!(cache.get(CacheCategory::Guild, "abc").unwrap(), "guild");
        assert!(cache.get(CacheCategory::RecentGames, "abc").is_none());
    }
}
