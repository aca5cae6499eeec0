//! User directory trait defining the identity lookups used by the core.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DirectoryError;

/// Read-only access to the user/identity store
///
/// `Ok(None)` means the user does not exist; `Err` is reserved for lookup
/// failures.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by id
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, DirectoryError>;

    /// Find a user by login email (case-insensitive)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;
}
