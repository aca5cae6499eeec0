//! Shared configuration and common types for Keyward
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types
//! - Error response body returned by the HTTP adapter
//! - The typed log record emitted by the services

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CacheType, Environment, JwtConfig, LogFormat,
    LoggingConfig, OtpConfig, PermissionCacheConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use logging::{mask_identifier, LogCategory, LogRecord, LogSubcategory};
