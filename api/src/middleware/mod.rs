pub mod auth;
pub mod permission;

pub use auth::{AuthContext, JwtAuth};
pub use permission::RequirePermissions;
