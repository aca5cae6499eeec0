//! Unit tests for token entities

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::token::{Claims, RevocationStatus, REVOKED_MARKER};

#[test]
fn test_claims_timestamps() {
    let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let claims = Claims::new("user-1", "jti-1", issued, Duration::days(7));

    assert_eq!(claims.sub, "user-1");
    assert_eq!(claims.jti, "jti-1");
    assert_eq!(claims.iat, issued.timestamp());
    assert_eq!(claims.exp, issued.timestamp() + 7 * 86400);
    assert_eq!(claims.expires_at(), Some(issued + Duration::days(7)));
}

#[test]
fn test_claims_expiry_and_remaining() {
    let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let claims = Claims::new("user-1", "jti-1", issued, Duration::seconds(100));

    assert!(!claims.is_expired_at(issued + Duration::seconds(99)));
    assert!(claims.is_expired_at(issued + Duration::seconds(100)));
    assert_eq!(claims.remaining_seconds(issued + Duration::seconds(40)), 60);
    assert_eq!(claims.remaining_seconds(issued + Duration::seconds(500)), 0);
}

#[test]
fn test_claims_wire_field_names() {
    let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let claims = Claims::new("user-1", "jti-1", issued, Duration::hours(1));
    let json = serde_json::to_value(&claims).unwrap();

    let mut fields: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    fields.sort();
    assert_eq!(fields, vec!["exp", "iat", "jti", "sub"]);
}

#[test]
fn test_revocation_status_from_cached() {
    assert_eq!(RevocationStatus::from_cached(None), RevocationStatus::Active);
    assert_eq!(RevocationStatus::from_cached(Some("")), RevocationStatus::Active);
    assert_eq!(
        RevocationStatus::from_cached(Some(REVOKED_MARKER)),
        RevocationStatus::Revoked
    );
    assert!(RevocationStatus::from_cached(Some("unexpected")).is_revoked());
}
