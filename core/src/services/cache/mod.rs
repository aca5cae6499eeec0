//! Key-value cache contract shared by all services
//!
//! - [`CacheStore`] is the capability every backend adapter implements
//! - [`MemoryCacheStore`] is an in-process backend for tests and development

mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::MemoryCacheStore;
pub use traits::CacheStore;

use kw_shared::logging::LogRecord;
use tracing::Level;

use crate::errors::{CacheError, DomainError};

/// Log a backend failure with its detail and return the opaque server error
pub(crate) fn server_error(record: LogRecord, error: &CacheError) -> DomainError {
    record
        .field("error", error)
        .emit(Level::ERROR, "Cache backend failure");
    DomainError::Server
}
