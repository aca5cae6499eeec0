//! # Keyward Core
//!
//! Session and credential lifecycle logic: bearer token issuance and
//! revocation, one-time passcode state for email verification and password
//! reset, and permission resolution for access control. All state lives in an
//! external key-value cache reached through the [`CacheStore`] trait.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
