//! Tests for upstream result caching.

use hypepulse_cache::{CacheCategory, ResultCache, ResultCacheConfig, ResultCacheConfigBuilder};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_cache_set_and_get() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    let value = json!({"uuid": "069a79f444e94726a5befca90e38aaf5", "displayname": "Notch"});
    cache.set(CacheCategory::Player, "069a79f444e94726a5befca90e38aaf5", value.clone(), None);

    let hit = cache
        .get(CacheCategory::Player, "069a79f444e94726a5befca90e38aaf5")
        .unwrap();
    assert_eq!(hit, value);
}

#[test]
fn test_cache_miss() {
    let cache = ResultCache::new(ResultCacheConfig::default());
    assert!(cache.get(CacheCategory::Identity, "nobody").is_none());
}

#[test]
fn test_identity_keys_are_case_folded() {
    let cache = ResultCache::new(ResultCacheConfig::default());
    cache.set(CacheCategory::Identity, "Technoblade", json!("b876ec32e396476ba1158438d83c67d4"), None);

    assert!(cache.get(CacheCategory::Identity, "technoblade").is_some());
    assert!(cache.get(CacheCategory::Identity, "TECHNOBLADE").is_some());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_identifier_keys_are_verbatim() {
    let cache = ResultCache::new(ResultCacheConfig::default());
    cache.set(CacheCategory::Guild, "ABCDEF", json!({"name": "Guild"}), None);

    assert!(cache.get(CacheCategory::Guild, "ABCDEF").is_some());
    assert!(cache.get(CacheCategory::Guild, "abcdef").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cache_expiration() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    cache.set(CacheCategory::Identity, "notch", json!("069a79f4"), Some(Duration::from_secs(1)));
    assert!(cache.get(CacheCategory::Identity, "notch").is_some());

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(cache.get(CacheCategory::Identity, "notch").is_none());
    // Expired entries are evicted on read
    assert_eq!(cache.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_exactly_at_ttl() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    cache.set(CacheCategory::Player, "id", json!({}), Some(Duration::from_secs(5)));

    tokio::time::advance(Duration::from_millis(4999)).await;
    assert!(cache.get(CacheCategory::Player, "id").is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(cache.get(CacheCategory::Player, "id").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_recent_games_use_short_default_ttl() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    cache.set(CacheCategory::RecentGames, "id", json!([]), None);
    cache.set(CacheCategory::Player, "id", json!({}), None);

    tokio::time::advance(Duration::from_secs(61)).await;

    assert!(cache.get(CacheCategory::RecentGames, "id").is_none());
    assert!(cache.get(CacheCategory::Player, "id").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_cache_cleanup_expired() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    cache.set(CacheCategory::RecentGames, "a", json!([]), Some(Duration::from_secs(1)));
    cache.set(CacheCategory::Player, "b", json!({}), None);
    assert_eq!(cache.len(), 2);

    tokio::time::advance(Duration::from_secs(2)).await;

    let removed = cache.cleanup_expired();
    assert_eq!(removed, 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_removes_expired_entries() {
    let config = ResultCacheConfigBuilder::default()
        .sweep_interval_secs(10)
        .build()
        .unwrap();
    let cache = Arc::new(ResultCache::new(config));
    let handle = cache.spawn_sweeper().unwrap();

    cache.set(CacheCategory::Identity, "notch", json!("id"), Some(Duration::from_secs(1)));
    assert_eq!(cache.len(), 1);

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(cache.len(), 0);

    handle.abort();
}

#[test]
fn test_sweeper_disabled_with_zero_interval() {
    let config = ResultCacheConfig::default().with_sweep_interval_secs(0);
    let cache = Arc::new(ResultCache::new(config));
    assert!(cache.spawn_sweeper().is_none());
}

#[test]
fn test_cache_lru_eviction() {
    let config = ResultCacheConfigBuilder::default()
        .max_size(2)
        .enabled(true)
        .build()
        .unwrap();
    let cache = ResultCache::new(config);

    cache.set(CacheCategory::Player, "1", json!({"data": 1}), None);
    cache.set(CacheCategory::Player, "2", json!({"data": 2}), None);

    // Touch "1" so "2" becomes least recently used
    assert!(cache.get(CacheCategory::Player, "1").is_some());

    cache.set(CacheCategory::Player, "3", json!({"data": 3}), None);

    assert_eq!(cache.len(), 2);
    assert!(cache.get(CacheCategory::Player, "1").is_some());
    assert!(cache.get(CacheCategory::Player, "2").is_none());
    assert!(cache.get(CacheCategory::Player, "3").is_some());
}

#[test]
fn test_overwrite_keeps_latest_value() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    cache.set(CacheCategory::Player, "id", json!({"karma": 1}), None);
    cache.set(CacheCategory::Player, "id", json!({"karma": 2}), None);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(CacheCategory::Player, "id").unwrap()["karma"], 2);
}

#[test]
fn test_cache_disabled() {
    let config = ResultCacheConfig::default().with_enabled(false);
    let cache = ResultCache::new(config);

    cache.set(CacheCategory::Identity, "notch", json!("id"), None);

    assert!(cache.get(CacheCategory::Identity, "notch").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_clear() {
    let cache = ResultCache::new(ResultCacheConfig::default());

    cache.set(CacheCategory::Identity, "a", json!("1"), None);
    cache.set(CacheCategory::Identity, "b", json!("2"), None);
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_zero_max_size_stores_nothing() {
    let cache = ResultCache::new(ResultCacheConfig::default().with_max_size(0usize));

    cache.set(CacheCategory::Player, "abc", json!({"karma": 1}), None);

    assert!(cache.is_empty());
    assert!(cache.get(CacheCategory::Player, "abc").is_none());
}
