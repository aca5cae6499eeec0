//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Access token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token lifetime in days
    pub access_token_lifetime_days: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Cache key prefix for revocation entries
    #[serde(default = "default_revocation_prefix")]
    pub revocation_prefix: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_lifetime_days: 7,
            algorithm: default_algorithm(),
            revocation_prefix: default_revocation_prefix(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in days
    pub fn with_lifetime_days(mut self, days: i64) -> Self {
        self.access_token_lifetime_days = days;
        self
    }

    /// Access token lifetime in seconds
    pub fn access_token_lifetime_seconds(&self) -> i64 {
        self.access_token_lifetime_days * 86400
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// One-time passcode configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Email verification code lifetime in seconds
    pub expiry_seconds: u64,

    /// Password reset code lifetime in seconds
    pub forget_password_expiry_seconds: u64,

    /// Number of decimal digits in a generated code
    pub digits: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_seconds: 300,                  // 5 minutes
            forget_password_expiry_seconds: 900,  // 15 minutes
            digits: 6,
        }
    }
}

/// Cached role key set configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PermissionCacheConfig {
    /// Lifetime of a cached permission key set in seconds
    pub ttl_seconds: u64,

    /// Cache key prefix for permission key sets
    #[serde(default = "default_permission_prefix")]
    pub key_prefix: String,
}

impl Default for PermissionCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600,
            key_prefix: default_permission_prefix(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Passcode configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Permission cache configuration
    #[serde(default)]
    pub permissions: PermissionCacheConfig,

    /// JSON file listing users and their permission keys
    #[serde(default)]
    pub directory_seed_file: Option<String>,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_defaults = JwtConfig::default();
        let otp_defaults = OtpConfig::default();
        let permission_defaults = PermissionCacheConfig::default();

        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
                access_token_lifetime_days: env_parse("JWT_ACCESS_TOKEN_DAYS")
                    .unwrap_or(jwt_defaults.access_token_lifetime_days),
                algorithm: jwt_defaults.algorithm,
                revocation_prefix: jwt_defaults.revocation_prefix,
            },
            otp: OtpConfig {
                expiry_seconds: env_parse("OTP_EXPIRY_SECONDS")
                    .unwrap_or(otp_defaults.expiry_seconds),
                forget_password_expiry_seconds: env_parse("FORGET_PASSWORD_OTP_EXPIRY_SECONDS")
                    .unwrap_or(otp_defaults.forget_password_expiry_seconds),
                digits: env_parse("OTP_DIGITS").unwrap_or(otp_defaults.digits),
            },
            permissions: PermissionCacheConfig {
                ttl_seconds: env_parse("PERMISSION_CACHE_TTL_SECONDS")
                    .unwrap_or(permission_defaults.ttl_seconds),
                key_prefix: permission_defaults.key_prefix,
            },
            directory_seed_file: std::env::var("DIRECTORY_SEED_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_revocation_prefix() -> String {
    String::from("jwt")
}

fn default_permission_prefix() -> String {
    String::from("permissions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_lifetime_days, 7);
        assert_eq!(config.access_token_lifetime_seconds(), 604800);
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.revocation_prefix, "jwt");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_lifetime_days(1);

        assert_eq!(config.access_token_lifetime_seconds(), 86400);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.expiry_seconds, 300);
        assert_eq!(config.forget_password_expiry_seconds, 900);
        assert_eq!(config.digits, 6);
    }

    #[test]
    fn test_auth_config_deserializes_with_missing_sections() {
        let json = r#"{"jwt": {"secret": "s", "access_token_lifetime_days": 2}}"#;
        let config: AuthConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.jwt.secret, "s");
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.otp.digits, 6);
        assert_eq!(config.permissions.key_prefix, "permissions");
    }
}
