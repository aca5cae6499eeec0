//! Role/permission directory trait, the source of truth for permission keys.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::permission::PermissionKey;
use crate::errors::DirectoryError;

/// Read-only access to the role/permission store
#[async_trait]
pub trait PermissionDirectory: Send + Sync {
    /// All permission keys granted to a user through their roles
    async fn get_permission_keys_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PermissionKey>, DirectoryError>;
}
