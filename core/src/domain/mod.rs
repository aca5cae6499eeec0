//! Domain layer containing the credential and access-control entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
