//! `CacheStore` backed by Redis

use async_trait::async_trait;
use std::time::Duration;

use kw_core::{CacheError, CacheStore};

use super::{CacheConfig, RedisClient};

/// Redis implementation of the core cache contract
///
/// Every key is namespaced with the configured prefix. Backend errors are
/// converted to [`CacheError`] and returned on the first failure; the core
/// logs and normalizes them, and the request deadline bounds the call.
#[derive(Clone)]
pub struct RedisCacheStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisCacheStore {
    /// Attempts per cache operation; failures surface without retries
    pub const OPERATION_ATTEMPTS: u32 = 1;

    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self {
            client: client.with_operation_attempts(Self::OPERATION_ATTEMPTS),
            config,
        }
    }

    /// Connect using `config` and wrap the client
    ///
    /// Establishing the connection is still retried with backoff.
    pub async fn connect(config: CacheConfig) -> Result<Self, crate::InfrastructureError> {
        let client = RedisClient::new(config.clone()).await?;
        Ok(Self::new(client, config))
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let key = self.config.make_key(key);
        Ok(self.client.get(&key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let key = self.config.make_key(key);
        Ok(self.client.set_with_ttl(&key, value, ttl).await?)
    }
}
