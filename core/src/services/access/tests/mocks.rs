//! Mock collaborators for permission resolver tests

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::CacheError;
use crate::services::cache::{CacheStore, MemoryCacheStore};

/// Cache that serves reads but rejects every write
pub struct ReadOnlyCacheStore {
    pub inner: MemoryCacheStore,
}

#[async_trait]
impl CacheStore for ReadOnlyCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Backend("READONLY replica".to_string()))
    }
}
