//! Configuration for the permission resolver

use std::time::Duration;

use kw_shared::config::PermissionCacheConfig;

/// Configuration for the permission resolver
#[derive(Debug, Clone)]
pub struct PermissionResolverConfig {
    /// Lifetime of a cached key set
    pub ttl: Duration,
    /// Cache key prefix for key sets
    pub key_prefix: String,
}

impl Default for PermissionResolverConfig {
    fn default() -> Self {
        Self::from_cache_config(&PermissionCacheConfig::default())
    }
}

impl PermissionResolverConfig {
    pub fn from_cache_config(config: &PermissionCacheConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.ttl_seconds),
            key_prefix: config.key_prefix.clone(),
        }
    }
}
