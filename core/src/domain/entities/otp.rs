//! One-time passcode state shared by email verification and password reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flow a passcode belongs to
///
/// Each purpose owns a separate key namespace, so the two flows never collide
/// for the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpPurpose {
    EmailVerification,
    ForgetPassword,
}

impl OtpPurpose {
    pub fn key_prefix(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "otp",
            OtpPurpose::ForgetPassword => "forget_password",
        }
    }

    /// Cache key for `identifier` under this purpose
    pub fn cache_key(&self, identifier: &str) -> String {
        format!("{}:{}", self.key_prefix(), normalize_identifier(identifier))
    }
}

/// Normalize an identifier before it is used in a key
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Persisted passcode state for one (purpose, identifier) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpState {
    pub value: String,
    pub used: bool,
    pub request_count: u32,
    pub created_at: DateTime<Utc>,
    pub last_request: DateTime<Utc>,
}

impl OtpState {
    /// First request of a new flow
    pub fn fresh(code: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            value: code.into(),
            used: false,
            request_count: 1,
            created_at: now,
            last_request: now,
        }
    }

    /// An unconsumed code that a new request may refresh
    pub fn is_live(&self) -> bool {
        !self.used && !self.value.is_empty()
    }

    /// Replace the code of a live state and count the request
    pub fn refresh(&mut self, code: impl Into<String>, now: DateTime<Utc>) {
        self.value = code.into();
        self.request_count = self.request_count.saturating_add(1);
        self.last_request = now;
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }
}
