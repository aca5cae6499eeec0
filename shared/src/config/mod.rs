//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token, one-time passcode, and permission cache settings
//! - `cache` - Cache backend selection and Redis configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, OtpConfig, PermissionCacheConfig};
pub use cache::{CacheConfig, CacheType};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token, passcode, and permission settings
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Values that are missing or fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check settings that must hold before the server may start
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.environment.is_production() && self.auth.directory_seed_file.is_none() {
            return Err("DIRECTORY_SEED_FILE must be set in production".to_string());
        }
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if self.auth.otp.digits == 0 || self.auth.otp.digits > 9 {
            return Err(format!(
                "OTP digit count must be between 1 and 9, got {}",
                self.auth.otp.digits
            ));
        }
        Ok(())
    }
}

/// Read and parse an environment variable, returning `None` when unset or invalid
pub(crate) fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
