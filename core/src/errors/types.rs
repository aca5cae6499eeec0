//! Error types for token verification and external collaborators

use thiserror::Error;

/// Token verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token revoked")]
    TokenRevoked,
}

/// Failure reported by a cache backend
///
/// The message may contain driver detail; it is only ever logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("cache operation failed: {0}")]
    Backend(String),
}

/// Failure reported by the user or permission directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("directory lookup failed: {message}")]
pub struct DirectoryError {
    pub message: String,
}

impl DirectoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
