//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Redis,
    /// In-process store, development and tests only
    Memory,
}

impl std::str::FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheType::Redis),
            "memory" | "mem" => Ok(CacheType::Memory),
            _ => Err(format!("Invalid cache type: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Backend used by the composition root
    #[serde(default = "default_cache_type")]
    pub cache_type: CacheType,

    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Prefix prepended to every cache key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: default_cache_type(),
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 5,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_type: env_parse("CACHE_TYPE").unwrap_or(defaults.cache_type),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: env_parse("REDIS_CONNECTION_TIMEOUT")
                .unwrap_or(defaults.connection_timeout),
            response_timeout: env_parse("REDIS_RESPONSE_TIMEOUT")
                .unwrap_or(defaults.response_timeout),
            key_prefix: std::env::var("CACHE_KEY_PREFIX").ok().filter(|p| !p.is_empty()),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_cache_type() -> CacheType {
    CacheType::Redis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.cache_type, CacheType::Redis);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379").with_prefix("keyward");
        assert_eq!(config.make_key("otp:a@b.com"), "keyward:otp:a@b.com");
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("jwt:abc"), "jwt:abc");
    }

    #[test]
    fn test_cache_type_from_str() {
        assert_eq!("memory".parse::<CacheType>().unwrap(), CacheType::Memory);
        assert_eq!("REDIS".parse::<CacheType>().unwrap(), CacheType::Redis);
        assert!("memcached".parse::<CacheType>().is_err());
    }
}
