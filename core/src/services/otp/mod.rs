//! One-time passcode lifecycle
//!
//! Tracks per-identifier passcode state for two isolated flows, email
//! verification and password reset. Each flow has its own key prefix and
//! expiry window; the state machine is otherwise identical:
//!
//! - `Absent -> Active` and `Active -> Active` (refresh) via `set`
//! - `Active -> Used` via `used`
//! - `Used -> Active` only via a new `set`
//!
//! Reads and writes are separate cache round-trips. Two concurrent `set`
//! calls for the same identifier may lose an update to the request count.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
