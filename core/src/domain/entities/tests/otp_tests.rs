//! Unit tests for passcode state

use chrono::{Duration, Utc};

use crate::domain::entities::otp::{normalize_identifier, OtpPurpose, OtpState};

#[test]
fn test_fresh_state() {
    let now = Utc::now();
    let state = OtpState::fresh("123456", now);

    assert_eq!(state.value, "123456");
    assert!(!state.used);
    assert_eq!(state.request_count, 1);
    assert_eq!(state.created_at, now);
    assert_eq!(state.last_request, now);
    assert!(state.is_live());
}

#[test]
fn test_refresh_keeps_creation_time() {
    let created = Utc::now() - Duration::seconds(1000);
    let mut state = OtpState::fresh("123456", created);
    let now = Utc::now();

    state.refresh("654321", now);

    assert_eq!(state.value, "654321");
    assert_eq!(state.request_count, 2);
    assert_eq!(state.created_at, created);
    assert_eq!(state.last_request, now);
}

#[test]
fn test_liveness() {
    let mut state = OtpState::fresh("123456", Utc::now());
    state.mark_used();
    assert!(!state.is_live());

    let empty = OtpState::fresh("", Utc::now());
    assert!(!empty.is_live());
}

#[test]
fn test_purpose_keys_are_isolated() {
    let verification = OtpPurpose::EmailVerification.cache_key("A@B.com");
    let reset = OtpPurpose::ForgetPassword.cache_key("A@B.com");

    assert_eq!(verification, "otp:a@b.com");
    assert_eq!(reset, "forget_password:a@b.com");
    assert_ne!(verification, reset);
}

#[test]
fn test_normalize_identifier() {
    assert_eq!(normalize_identifier("  Alice@Example.COM "), "alice@example.com");
}

#[test]
fn test_state_json_shape() {
    let state = OtpState::fresh("123456", Utc::now());
    let json = serde_json::to_value(&state).unwrap();

    assert_eq!(json["value"], "123456");
    assert_eq!(json["used"], false);
    assert_eq!(json["request_count"], 1);
    assert!(json.get("created_at").is_some());
    assert!(json.get("last_request").is_some());
}
