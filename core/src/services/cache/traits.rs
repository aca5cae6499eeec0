//! Trait for cache backend integration

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::CacheError;

/// Key-value store with per-key TTL
///
/// Single-key reads and writes are atomic; there is no multi-key
/// transaction, so a read followed by a write can interleave with another
/// caller's write to the same key.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value; `Ok(None)` means the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value that expires after `ttl`
    ///
    /// A zero `ttl` stores an entry that is already expired.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
