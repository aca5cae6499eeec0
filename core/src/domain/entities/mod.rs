//! Domain entities representing tokens, passcode state, users, and permissions.

pub mod otp;
pub mod permission;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use otp::{normalize_identifier, OtpPurpose, OtpState};
pub use permission::{PermissionKey, PermissionSet};
pub use token::{Claims, RevocationStatus, REVOKED_MARKER};
pub use user::User;
