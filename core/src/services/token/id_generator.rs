//! Unique token identifier generation

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of JWT IDs
pub trait JtiGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidJtiGenerator;

impl JtiGenerator for UuidJtiGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`prefix-1`, `prefix-2`, ...) for tests
#[derive(Debug)]
pub struct SequentialJtiGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialJtiGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl JtiGenerator for SequentialJtiGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
