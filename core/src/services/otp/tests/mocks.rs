//! Mock collaborators for OTP service tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::errors::CacheError;
use crate::services::cache::{CacheStore, MemoryCacheStore};

/// Memory store whose reads and writes can fail independently
pub struct FlakyCacheStore {
    pub inner: MemoryCacheStore,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
}

impl FlakyCacheStore {
    pub fn new(inner: MemoryCacheStore) -> Self {
        Self {
            inner,
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for FlakyCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("READONLY replica".to_string()));
        }
        self.inner.set(key, value, ttl).await
    }
}
