//! Bearer token claims and revocation entries.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Value stored in a revocation entry once its token has been logged out
pub const REVOKED_MARKER: &str = "logout";

/// Claims structure for the JWT payload
///
/// Field names are part of the wire format shared with other services and
/// must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (opaque user identifier)
    pub sub: String,

    /// JWT ID, the revocation key
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at` that lives for `lifetime`
    pub fn new(
        subject: impl Into<String>,
        jti: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: subject.into(),
            jti: jti.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiry as a `DateTime`, `None` if `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Seconds of validity left at `now`, never negative
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now.timestamp()).max(0)
    }
}

/// Interpretation of a cached revocation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationStatus {
    Active,
    Revoked,
}

impl RevocationStatus {
    /// Classify the value read for a `prefix:jti` key
    ///
    /// An absent or empty entry means the token is active. `"logout"` means it
    /// was revoked; any other non-empty value is also treated as revoked.
    pub fn from_cached(value: Option<&str>) -> Self {
        match value {
            None | Some("") => RevocationStatus::Active,
            Some(REVOKED_MARKER) => RevocationStatus::Revoked,
            Some(_) => RevocationStatus::Revoked,
        }
    }

    pub fn is_revoked(&self) -> bool {
        matches!(self, RevocationStatus::Revoked)
    }
}
