//! In-memory implementation of PermissionDirectory for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::permission::PermissionKey;
use crate::errors::DirectoryError;

use super::trait_::PermissionDirectory;

/// In-memory permission directory that counts lookups
#[derive(Clone, Default)]
pub struct MockPermissionDirectory {
    grants: Arc<RwLock<HashMap<Uuid, Vec<PermissionKey>>>>,
    lookups: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl MockPermissionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keys granted to a user
    pub async fn grant(&self, user_id: Uuid, keys: &[&str]) {
        let keys = keys.iter().map(|k| PermissionKey::from(*k)).collect();
        self.grants.write().await.insert(user_id, keys);
    }

    /// Number of lookups served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PermissionDirectory for MockPermissionDirectory {
    async fn get_permission_keys_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PermissionKey>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DirectoryError::new("permission directory unavailable"));
        }
        Ok(self
            .grants
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
