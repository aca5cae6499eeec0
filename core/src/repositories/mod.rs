//! Directory interfaces the access-control core reads from.
//!
//! The identity and role stores live outside this crate; only their lookup
//! contracts are defined here, along with in-memory implementations for tests
//! and local development.

pub mod permission;
pub mod user;

pub use permission::{MockPermissionDirectory, PermissionDirectory};
pub use user::{MockUserDirectory, UserDirectory};
