//! Main token service implementation

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use kw_shared::logging::{LogCategory, LogRecord, LogSubcategory};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use crate::domain::entities::token::{Claims, RevocationStatus, REVOKED_MARKER};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::cache::{server_error, CacheStore};
use crate::services::clock::{Clock, SystemClock};
use crate::services::context::OpContext;

use super::config::TokenServiceConfig;
use super::id_generator::{JtiGenerator, UuidJtiGenerator};

/// Service for issuing, revoking, and verifying bearer tokens
///
/// Every issued token has a revocation entry at `prefix:jti`. The entry is
/// empty while the token is active and holds `"logout"` once revoked; its TTL
/// never exceeds the token's remaining validity.
pub struct TokenService {
    cache: Arc<dyn CacheStore>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    id_generator: Arc<dyn JtiGenerator>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `cache` - Cache holding revocation entries
    /// * `config` - Token service configuration
    pub fn new(cache: Arc<dyn CacheStore>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked against the injected clock after decoding
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            cache,
            config,
            encoding_key,
            decoding_key,
            validation,
            id_generator: Arc::new(UuidJtiGenerator),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the JWT ID source
    pub fn with_id_generator(mut self, id_generator: Arc<dyn JtiGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Cache key of the revocation entry for `jti`
    pub fn revocation_key(&self, jti: &str) -> String {
        format!("{}:{}", self.config.revocation_prefix, jti)
    }

    /// Issues a signed access token for a subject
    ///
    /// The token is only returned once its revocation entry has been written;
    /// a token whose JTI is not registered could not be revoked reliably.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError::Server)` - Signing or the cache write failed
    /// * `Err(DomainError::Canceled)` - The context was canceled
    pub async fn generate_token(&self, ctx: &OpContext, subject: &str) -> DomainResult<String> {
        ctx.check()?;

        let jti = self.id_generator.next_id();
        let claims = Claims::new(
            subject,
            jti.clone(),
            self.clock.now(),
            self.config.access_token_lifetime,
        );
        let token = self.encode_jwt(&claims)?;

        let ttl = Duration::from_secs(self.config.access_token_lifetime.num_seconds().max(0) as u64);
        let key = self.revocation_key(&jti);
        ctx.run(self.cache.set(&key, "", ttl)).await?.map_err(|e| {
            server_error(
                LogRecord::new(LogCategory::Token, LogSubcategory::Issue).field("jti", &jti),
                &e,
            )
        })?;

        LogRecord::new(LogCategory::Token, LogSubcategory::Issue)
            .field("jti", &jti)
            .field("exp", claims.exp)
            .emit(Level::DEBUG, "Issued access token");

        Ok(token)
    }

    /// Revokes a token by JWT ID
    ///
    /// The revocation entry lives exactly as long as the token would have,
    /// `expires_at_unix - now`, clamped to zero for tokens already expired and
    /// to the access token lifetime, since no issued token outlives it.
    /// Repeated calls overwrite the same entry.
    pub async fn logout_token(
        &self,
        ctx: &OpContext,
        jti: &str,
        expires_at_unix: i64,
    ) -> DomainResult<()> {
        let remaining = self.revocation_ttl_seconds(expires_at_unix);
        let ttl = Duration::from_secs(remaining);
        let key = self.revocation_key(jti);

        ctx.run(self.cache.set(&key, REVOKED_MARKER, ttl))
            .await?
            .map_err(|e| {
                server_error(
                    LogRecord::new(LogCategory::Token, LogSubcategory::Logout).field("jti", jti),
                    &e,
                )
            })?;

        LogRecord::new(LogCategory::Token, LogSubcategory::Logout)
            .field("jti", jti)
            .field("ttl_seconds", remaining)
            .emit(Level::INFO, "Revoked access token");

        Ok(())
    }

    /// Seconds a revocation entry for a token expiring at `expires_at_unix` must live
    fn revocation_ttl_seconds(&self, expires_at_unix: i64) -> u64 {
        let max_lifetime = self.config.access_token_lifetime.num_seconds().max(0);
        let remaining = expires_at_unix.saturating_sub(self.clock.now().timestamp());
        remaining.clamp(0, max_lifetime) as u64
    }

    /// Revokes the token described by `claims`
    pub async fn logout(&self, ctx: &OpContext, claims: &Claims) -> DomainResult<()> {
        self.logout_token(ctx, &claims.jti, claims.exp).await
    }

    /// Checks the revocation entry for `jti`
    ///
    /// # Returns
    ///
    /// * `Ok(false)` - No entry, or an empty one
    /// * `Ok(true)` - The token was logged out
    /// * `Err(DomainError::Server)` - The cache could not be read
    pub async fn is_revoked(&self, ctx: &OpContext, jti: &str) -> DomainResult<bool> {
        let key = self.revocation_key(jti);
        let value = ctx.run(self.cache.get(&key)).await?.map_err(|e| {
            server_error(
                LogRecord::new(LogCategory::Token, LogSubcategory::RevocationCheck)
                    .field("jti", jti),
                &e,
            )
        })?;

        Ok(RevocationStatus::from_cached(value.as_deref()).is_revoked())
    }

    /// Verifies an incoming access token and returns its claims
    ///
    /// Checks signature, expiry against the service clock, and revocation, in
    /// that order.
    pub async fn verify_access_token(&self, ctx: &OpContext, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_jwt(token)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        if self.is_revoked(ctx, &claims.jti).await? {
            LogRecord::new(LogCategory::Token, LogSubcategory::Verify)
                .field("jti", &claims.jti)
                .emit(Level::INFO, "Rejected revoked access token");
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(claims)
    }

    /// Decodes and checks the signature of a token without consulting the cache
    pub fn decode_jwt(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            LogRecord::new(LogCategory::Token, LogSubcategory::Issue)
                .field("error", e)
                .emit(Level::ERROR, "Token signing failed");
            DomainError::Server
        })
    }
}
