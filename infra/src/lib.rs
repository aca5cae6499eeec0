//! # Infrastructure Layer
//!
//! Concrete adapters for the collaborator traits defined in `kw_core`.
//!
//! - **Cache**: Redis client with retry logic and the [`cache::RedisCacheStore`]
//!   implementation of `kw_core::CacheStore`

/// Cache module - Redis client and the cache store adapter
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A Redis round-trip exceeded the configured response timeout
    #[error("Cache timeout: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for kw_core::CacheError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Cache(e) if e.is_connection_refusal() || e.is_io_error() => {
                kw_core::CacheError::Unavailable(e.to_string())
            }
            InfrastructureError::Timeout(msg) => kw_core::CacheError::Unavailable(msg),
            other => kw_core::CacheError::Backend(other.to_string()),
        }
    }
}
