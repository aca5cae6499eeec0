//! Main OTP service implementation

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use kw_shared::logging::{mask_identifier, LogCategory, LogRecord, LogSubcategory};
use rand::{rngs::OsRng, Rng};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use crate::domain::entities::otp::{OtpPurpose, OtpState};
use crate::errors::{DomainError, DomainResult};
use crate::services::cache::{server_error, CacheStore};
use crate::services::clock::{Clock, SystemClock};
use crate::services::context::OpContext;

use super::config::OtpServiceConfig;

/// Service managing one-time passcode state in the cache
pub struct OtpService {
    cache: Arc<dyn CacheStore>,
    config: OtpServiceConfig,
    clock: Arc<dyn Clock>,
}

impl OtpService {
    /// Creates a new OTP service
    ///
    /// # Arguments
    ///
    /// * `cache` - Cache holding passcode state
    /// * `config` - Expiry windows and code length
    pub fn new(cache: Arc<dyn CacheStore>, config: OtpServiceConfig) -> Self {
        Self {
            cache,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Generate a uniformly random decimal code of the configured length
    ///
    /// Drawn from the OS CSPRNG; `gen_range` rejects samples outside the code
    /// space, so every code is equally likely.
    pub fn generate_code(&self) -> String {
        let digits = self.config.digits as usize;
        let upper = 10u64.pow(self.config.digits);
        let code = OsRng.gen_range(0..upper);
        format!("{:0width$}", code, width = digits)
    }

    /// Store an email verification code for `identifier`
    pub async fn set(&self, ctx: &OpContext, identifier: &str, code: &str) -> DomainResult<()> {
        self.store(ctx, OtpPurpose::EmailVerification, identifier, code)
            .await
    }

    /// Check an email verification code
    pub async fn validate(&self, ctx: &OpContext, identifier: &str, code: &str) -> DomainResult<()> {
        self.check(ctx, OtpPurpose::EmailVerification, identifier, code)
            .await
    }

    /// Mark the email verification code as consumed
    pub async fn used(&self, ctx: &OpContext, identifier: &str) -> DomainResult<()> {
        self.consume(ctx, OtpPurpose::EmailVerification, identifier)
            .await
    }

    /// Store a password reset code for `identifier`
    pub async fn set_forget_password(
        &self,
        ctx: &OpContext,
        identifier: &str,
        code: &str,
    ) -> DomainResult<()> {
        self.store(ctx, OtpPurpose::ForgetPassword, identifier, code)
            .await
    }

    /// Check a password reset code
    pub async fn validate_forget_password(
        &self,
        ctx: &OpContext,
        identifier: &str,
        code: &str,
    ) -> DomainResult<()> {
        self.check(ctx, OtpPurpose::ForgetPassword, identifier, code)
            .await
    }

    /// Mark the password reset code as consumed
    pub async fn used_forget_password(&self, ctx: &OpContext, identifier: &str) -> DomainResult<()> {
        self.consume(ctx, OtpPurpose::ForgetPassword, identifier)
            .await
    }

    /// Stored email verification state, if any
    pub async fn state(&self, ctx: &OpContext, identifier: &str) -> DomainResult<Option<OtpState>> {
        self.load(ctx, OtpPurpose::EmailVerification, identifier, LogSubcategory::Validate)
            .await
    }

    /// Stored password reset state, if any
    pub async fn forget_password_state(
        &self,
        ctx: &OpContext,
        identifier: &str,
    ) -> DomainResult<Option<OtpState>> {
        self.load(ctx, OtpPurpose::ForgetPassword, identifier, LogSubcategory::Validate)
            .await
    }

    /// Refresh a live code or start a new flow, then persist for a full window
    async fn store(
        &self,
        ctx: &OpContext,
        purpose: OtpPurpose,
        identifier: &str,
        code: &str,
    ) -> DomainResult<()> {
        let now = self.clock.now();
        let state = match self.load(ctx, purpose, identifier, LogSubcategory::Set).await? {
            Some(mut current) if current.is_live() => {
                current.refresh(code, now);
                current
            }
            _ => OtpState::fresh(code, now),
        };

        let ttl = self.config.window(purpose);
        self.persist(ctx, purpose, identifier, &state, ttl, LogSubcategory::Set)
            .await?;

        record(purpose, LogSubcategory::Set, identifier)
            .field("request_count", state.request_count)
            .emit(Level::INFO, "Stored one-time passcode");

        Ok(())
    }

    /// Compare `code` with the stored value in constant time
    ///
    /// Any failure to produce a comparable value is reported as `InvalidOtp`,
    /// except cancellation. The `used` flag is not consulted here.
    async fn check(
        &self,
        ctx: &OpContext,
        purpose: OtpPurpose,
        identifier: &str,
        code: &str,
    ) -> DomainResult<()> {
        let key = purpose.cache_key(identifier);
        let cached = match ctx.run(self.cache.get(&key)).await? {
            Ok(cached) => cached,
            Err(e) => {
                record(purpose, LogSubcategory::Validate, identifier)
                    .field("error", e)
                    .emit(Level::ERROR, "Cache read failed during passcode validation");
                return Err(DomainError::InvalidOtp);
            }
        };

        let state = match cached.map(|raw| serde_json::from_str::<OtpState>(&raw)) {
            Some(Ok(state)) => state,
            Some(Err(e)) => {
                record(purpose, LogSubcategory::Validate, identifier)
                    .field("error", e)
                    .emit(Level::ERROR, "Stored passcode state is undecodable");
                return Err(DomainError::InvalidOtp);
            }
            None => return Err(DomainError::InvalidOtp),
        };

        if state.value.is_empty() || !constant_time_eq(code.as_bytes(), state.value.as_bytes()) {
            record(purpose, LogSubcategory::Validate, identifier)
                .emit(Level::INFO, "Rejected one-time passcode");
            return Err(DomainError::InvalidOtp);
        }

        Ok(())
    }

    /// Set the used flag on a live code; absent, empty, or used state is a no-op
    async fn consume(&self, ctx: &OpContext, purpose: OtpPurpose, identifier: &str) -> DomainResult<()> {
        let mut state = match self
            .load(ctx, purpose, identifier, LogSubcategory::MarkUsed)
            .await?
        {
            Some(state) if state.is_live() => state,
            _ => return Ok(()),
        };
        state.mark_used();

        let ttl = match purpose {
            OtpPurpose::EmailVerification => self.config.window(purpose),
            OtpPurpose::ForgetPassword => {
                remaining_window(state.last_request, self.config.window(purpose), self.clock.now())
            }
        };
        self.persist(ctx, purpose, identifier, &state, ttl, LogSubcategory::MarkUsed)
            .await?;

        record(purpose, LogSubcategory::MarkUsed, identifier)
            .field("ttl_seconds", ttl.as_secs())
            .emit(Level::INFO, "Marked one-time passcode as used");

        Ok(())
    }

    async fn load(
        &self,
        ctx: &OpContext,
        purpose: OtpPurpose,
        identifier: &str,
        subcategory: LogSubcategory,
    ) -> DomainResult<Option<OtpState>> {
        let key = purpose.cache_key(identifier);
        let cached = ctx
            .run(self.cache.get(&key))
            .await?
            .map_err(|e| server_error(record(purpose, subcategory, identifier), &e))?;

        match cached {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                record(purpose, subcategory, identifier)
                    .field("error", e)
                    .emit(Level::ERROR, "Stored passcode state is undecodable");
                DomainError::Server
            }),
            None => Ok(None),
        }
    }

    async fn persist(
        &self,
        ctx: &OpContext,
        purpose: OtpPurpose,
        identifier: &str,
        state: &OtpState,
        ttl: Duration,
        subcategory: LogSubcategory,
    ) -> DomainResult<()> {
        let raw = serde_json::to_string(state).map_err(|e| {
            record(purpose, subcategory, identifier)
                .field("error", e)
                .emit(Level::ERROR, "Failed to encode passcode state");
            DomainError::Server
        })?;

        let key = purpose.cache_key(identifier);
        ctx.run(self.cache.set(&key, &raw, ttl))
            .await?
            .map_err(|e| server_error(record(purpose, subcategory, identifier), &e))
    }
}

/// Time left in the window opened by `last_request`, clamped to zero
fn remaining_window(last_request: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> Duration {
    let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::zero());
    (last_request + window - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

fn record(purpose: OtpPurpose, subcategory: LogSubcategory, identifier: &str) -> LogRecord {
    LogRecord::new(LogCategory::Otp, subcategory)
        .field("purpose", purpose.key_prefix())
        .field("identifier", mask_identifier(identifier))
}
