//! Configuration for the OTP service

use std::time::Duration;

use kw_shared::config::OtpConfig;

use crate::domain::entities::otp::OtpPurpose;

/// Largest digit count whose code space fits comfortably in a `u64`
pub const MAX_CODE_DIGITS: u32 = 9;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of an email verification code
    pub verification_window: Duration,
    /// Lifetime of a password reset code
    pub forget_password_window: Duration,
    /// Number of decimal digits in a generated code
    pub digits: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from_otp_config(&OtpConfig::default())
    }
}

impl OtpServiceConfig {
    pub fn from_otp_config(config: &OtpConfig) -> Self {
        Self {
            verification_window: Duration::from_secs(config.expiry_seconds),
            forget_password_window: Duration::from_secs(config.forget_password_expiry_seconds),
            digits: config.digits.clamp(1, MAX_CODE_DIGITS),
        }
    }

    /// Expiry window of a purpose
    pub fn window(&self, purpose: OtpPurpose) -> Duration {
        match purpose {
            OtpPurpose::EmailVerification => self.verification_window,
            OtpPurpose::ForgetPassword => self.forget_password_window,
        }
    }
}
