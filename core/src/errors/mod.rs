//! Domain error taxonomy and collaborator error types.
//!
//! Services return [`DomainError`]. Collaborator failures ([`CacheError`],
//! [`DirectoryError`]) are logged where they occur and normalized to
//! [`DomainError::Server`] before crossing the service boundary, so backend
//! detail never reaches callers.

mod types;


pub use types::{CacheError, DirectoryError, TokenError};

use kw_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Wrong or absent one-time passcode
    #[error("Invalid or expired code")]
    InvalidOtp,

    /// Opaque infrastructure failure
    #[error("Internal server error")]
    Server,

    /// The execution context was canceled or its deadline passed
    #[error("Operation canceled")]
    Canceled,

    /// None of the required permissions is granted
    #[error("Access denied")]
    AccessDenied,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn is_invalid_otp(&self) -> bool {
        matches!(self, DomainError::InvalidOtp)
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, DomainError::Server)
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, DomainError::Canceled)
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::InvalidOtp => error_codes::INVALID_OTP,
            DomainError::Server => error_codes::INTERNAL_ERROR,
            DomainError::Canceled => error_codes::CANCELED,
            DomainError::AccessDenied => error_codes::FORBIDDEN,
            DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
            DomainError::Token(TokenError::TokenRevoked) => error_codes::TOKEN_REVOKED,
            DomainError::Token(TokenError::InvalidTokenFormat) => error_codes::TOKEN_INVALID,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
