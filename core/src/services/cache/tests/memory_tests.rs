//! Unit tests for the in-memory cache store

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::CacheError;
use crate::services::cache::memory::SWEEP_INTERVAL;
use crate::services::cache::{CacheStore, MemoryCacheStore};
use crate::services::clock::ManualClock;

fn store() -> (MemoryCacheStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    (MemoryCacheStore::with_clock(clock.clone()), clock)
}

#[tokio::test]
async fn test_absent_key_is_not_an_error() {
    let (store, _) = store();
    assert_eq!(store.get("missing").await, Ok(None));
}

#[tokio::test]
async fn test_entry_expires_with_clock() {
    let (store, clock) = store();
    store.set("k", "v", Duration::from_secs(60)).await.unwrap();

    clock.advance(chrono::Duration::seconds(59));
    assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    assert_eq!(store.ttl_of("k"), Some(Duration::from_secs(1)));

    clock.advance(chrono::Duration::seconds(1));
    assert_eq!(store.ttl_of("k"), None);
    assert_eq!(store.stored_len(), 1);
    assert_eq!(store.get("k").await.unwrap(), None);
    assert_eq!(store.stored_len(), 0);
    assert_eq!(store.purge_expired(), 0);
}

#[tokio::test]
async fn test_purge_expired_drops_only_lapsed_entries() {
    let (store, clock) = store();
    store.set("short", "v", Duration::from_secs(10)).await.unwrap();
    store.set("long", "v", Duration::from_secs(100)).await.unwrap();

    clock.advance(chrono::Duration::seconds(10));
    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.stored_len(), 1);
    assert_eq!(store.get("long").await.unwrap(), Some("v".to_string()));
}

#[tokio::test]
async fn test_writes_sweep_unread_expired_entries() {
    let (store, clock) = store();
    for i in 0..SWEEP_INTERVAL - 1 {
        store
            .set(&format!("revoked:{}", i), "logout", Duration::from_secs(5))
            .await
            .unwrap();
    }
    clock.advance(chrono::Duration::seconds(5));
    assert_eq!(store.stored_len(), SWEEP_INTERVAL - 1);

    store.set("fresh", "v", Duration::from_secs(60)).await.unwrap();

    assert_eq!(store.stored_len(), 1);
    assert_eq!(store.get("fresh").await.unwrap(), Some("v".to_string()));
}

#[tokio::test]
async fn test_zero_ttl_is_immediately_expired() {
    let (store, _) = store();
    store.set("k", "v", Duration::ZERO).await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), None);
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_failure_injection() {
    let (store, _) = store();
    store.set_failing(true);

    assert!(matches!(store.get("k").await, Err(CacheError::Unavailable(_))));
    assert!(store.set("k", "v", Duration::from_secs(1)).await.is_err());
    assert_eq!(store.write_count(), 0);
}
