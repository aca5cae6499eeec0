//! Mapping of core errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use kw_core::DomainError;
use kw_shared::{error_codes, ErrorResponse};

/// HTTP-facing wrapper around [`DomainError`]
///
/// The body never carries more than the stable error code and the error's
/// display message; backend detail was already stripped by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Domain(DomainError),
    /// No usable `Authorization: Bearer` header
    MissingCredentials,
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain(e) => write!(f, "{}", e),
            ApiError::MissingCredentials => f.write_str("Missing or invalid Authorization header"),
        }
    }
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Domain(e) => e.error_code(),
            ApiError::MissingCredentials => error_codes::UNAUTHORIZED,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::InvalidOtp) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::Token(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::AccessDenied) => StatusCode::FORBIDDEN,
            ApiError::Domain(DomainError::Canceled) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Domain(DomainError::Server) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "Request failed: {}", self);
        } else {
            tracing::debug!(code = self.error_code(), "Request rejected: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse::new(self.error_code(), self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use kw_core::TokenError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::InvalidOtp, StatusCode::UNAUTHORIZED),
            (DomainError::Token(TokenError::TokenRevoked), StatusCode::UNAUTHORIZED),
            (DomainError::Token(TokenError::TokenExpired), StatusCode::UNAUTHORIZED),
            (DomainError::AccessDenied, StatusCode::FORBIDDEN),
            (DomainError::Canceled, StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::Server, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
        assert_eq!(ApiError::MissingCredentials.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_server_error_body_is_opaque() {
        let response = ApiError::from(DomainError::Server).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "INTERNAL_ERROR");
        assert_eq!(json["message"], "Internal server error");
    }
}
