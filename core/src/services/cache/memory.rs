//! In-process cache backend driven by an injected clock

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::errors::CacheError;
use crate::services::clock::{Clock, SystemClock};

use super::traits::CacheStore;

/// Writes between full sweeps of expired entries
pub(crate) const SWEEP_INTERVAL: usize = 128;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Cache store kept in process memory
///
/// Entries expire according to the injected [`Clock`], so tests can move
/// time forward without sleeping. An expired entry is dropped when it is read,
/// and every [`SWEEP_INTERVAL`] writes drop all expired entries.
#[derive(Clone)]
pub struct MemoryCacheStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
    writes: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
            writes: Arc::new(AtomicUsize::new(0)),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call return a backend error
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Remaining lifetime of a live entry
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.lock()
            .get(key)
            .filter(|e| e.expires_at > now)
            .and_then(|e| (e.expires_at - now).to_std().ok())
    }

    /// Number of entries held, including expired ones not yet dropped
    pub fn stored_len(&self) -> usize {
        self.lock().len()
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_failure(&self) -> Result<(), CacheError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("memory store set to fail".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.check_failure()?;
        let now = self.clock.now();
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.check_failure()?;
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| CacheError::Backend(format!("ttl out of range: {}", e)))?;
        let entry = Entry {
            value: value.to_string(),
            expires_at: self.clock.now() + ttl,
        };
        self.lock().insert(key.to_string(), entry);

        let writes = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if writes % SWEEP_INTERVAL == 0 {
            let removed = self.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired cache entries");
            }
        }
        Ok(())
    }
}
