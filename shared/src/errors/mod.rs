//! Shared error response body

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every HTTP endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Stable error codes shared by the services and the HTTP adapter
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const CANCELED: &str = "CANCELED";
    pub const INVALID_OTP: &str = "INVALID_OTP";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_REVOKED: &str = "TOKEN_REVOKED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serializes_code_and_message() {
        let body = ErrorResponse::new(error_codes::INVALID_OTP, "Invalid code");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"], "INVALID_OTP");
        assert_eq!(json["message"], "Invalid code");
        assert!(json.get("timestamp").is_some());
    }
}
