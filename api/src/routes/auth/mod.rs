//! Session endpoints under `/api/v1/auth`, all behind [`JwtAuth`](crate::middleware::JwtAuth)

pub mod logout;
pub mod permissions;
pub mod revoke;

/// Permission required to revoke another session
pub const REVOKE_PERMISSION: &str = "tokens.revoke";
