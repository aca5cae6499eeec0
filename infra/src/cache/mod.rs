//! Cache module for Redis-based caching
//!
//! Provides the Redis connection with retry logic and the adapter that exposes
//! it to the core services as a `CacheStore`.

pub mod redis_client;
pub mod redis_store;


pub use redis_client::RedisClient;
pub use redis_store::RedisCacheStore;

// Re-export commonly used types
pub use kw_shared::config::CacheConfig;
