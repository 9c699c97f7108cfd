//! Upstream result caching with TTL support.
//!
//! This crate provides the in-memory cache that sits in front of the identity
//! and stats services, so repeated lookups for the same player inside the TTL
//! window never reach the network.

#![warn(missing_docs)]

mod cache;

pub use cache::{
    CacheCategory, CacheEntry, ResultCache, ResultCacheConfig, ResultCacheConfigBuilder,
};
