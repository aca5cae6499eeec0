//! In-memory implementation of UserDirectory for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DirectoryError;

use super::trait_::UserDirectory;

/// In-memory user directory
#[derive(Clone, Default)]
pub struct MockUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail: Arc<AtomicBool>,
}

impl MockUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Make every subsequent lookup fail
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DirectoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DirectoryError::new("user directory unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, DirectoryError> {
        self.check_failure()?;
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        self.check_failure()?;
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }
}
