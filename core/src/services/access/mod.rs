//! Permission resolution for access control
//!
//! A user's permission keys are read cache-first and checked against the
//! keys an action requires. Membership is flat: no hierarchy, no wildcards.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::PermissionResolverConfig;
pub use service::PermissionResolver;
