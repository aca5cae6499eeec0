//! Token service module for bearer token management
//!
//! This module handles:
//! - Signed access token issuance with a unique JWT ID
//! - Revocation entries keyed by JWT ID, bounded to the token's lifetime
//! - Verification of incoming tokens against signature, expiry, and revocation

mod config;
mod id_generator;
mod service;


pub use config::TokenServiceConfig;
pub use id_generator::{JtiGenerator, SequentialJtiGenerator, UuidJtiGenerator};
pub use service::TokenService;
