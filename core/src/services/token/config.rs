//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use kw_shared::config::JwtConfig;

use crate::errors::{DomainError, DomainResult};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric signing secret
    pub secret: String,
    /// Signing algorithm, one of the HMAC family
    pub algorithm: Algorithm,
    /// Lifetime of an access token
    pub access_token_lifetime: Duration,
    /// Cache key prefix for revocation entries
    pub revocation_prefix: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            secret: jwt.secret,
            algorithm: Algorithm::HS256,
            access_token_lifetime: Duration::days(jwt.access_token_lifetime_days),
            revocation_prefix: jwt.revocation_prefix,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT settings
    ///
    /// Only symmetric algorithms are accepted since tokens are keyed by a
    /// shared secret.
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = match config.algorithm.to_uppercase().as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                tracing::error!(algorithm = other, "Unsupported token signing algorithm");
                return Err(DomainError::Server);
            }
        };

        Ok(Self {
            secret: config.secret.clone(),
            algorithm,
            access_token_lifetime: Duration::days(config.access_token_lifetime_days),
            revocation_prefix: config.revocation_prefix.clone(),
        })
    }
}
