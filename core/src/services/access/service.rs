//! Main permission resolver implementation

use kw_shared::logging::{mask_identifier, LogCategory, LogRecord, LogSubcategory};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

use crate::domain::entities::permission::{PermissionKey, PermissionSet};
use crate::domain::entities::user::User;
use crate::errors::{DirectoryError, DomainError, DomainResult};
use crate::repositories::{PermissionDirectory, UserDirectory};
use crate::services::cache::{server_error, CacheStore};
use crate::services::context::OpContext;

use super::config::PermissionResolverConfig;

/// Resolves permission key sets and checks them against requirements
pub struct PermissionResolver {
    users: Arc<dyn UserDirectory>,
    permissions: Arc<dyn PermissionDirectory>,
    cache: Arc<dyn CacheStore>,
    config: PermissionResolverConfig,
}

impl PermissionResolver {
    /// Creates a new permission resolver
    ///
    /// # Arguments
    ///
    /// * `users` - Identity directory
    /// * `permissions` - Role/permission source of truth
    /// * `cache` - Cache for resolved key sets
    /// * `config` - Cache TTL and key prefix
    pub fn new(
        users: Arc<dyn UserDirectory>,
        permissions: Arc<dyn PermissionDirectory>,
        cache: Arc<dyn CacheStore>,
        config: PermissionResolverConfig,
    ) -> Self {
        Self {
            users,
            permissions,
            cache,
            config,
        }
    }

    /// Cache key of a user's key set
    pub fn cache_key(&self, user_id: Uuid) -> String {
        format!("{}:user:{}", self.config.key_prefix, user_id)
    }

    /// Check whether a user holds at least one of `required`
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The user's keys intersect `required`
    /// * `Ok(false)` - No overlap, `required` is empty, or the user is unknown
    /// * `Err(DomainError::Server)` - A directory or cache read failed
    /// * `Err(DomainError::Canceled)` - The context was canceled
    pub async fn check_access(
        &self,
        ctx: &OpContext,
        user_id: Uuid,
        required: &[PermissionKey],
    ) -> DomainResult<bool> {
        if required.is_empty() {
            LogRecord::new(LogCategory::Access, LogSubcategory::CheckAccess)
                .field("user_id", user_id)
                .emit(Level::WARN, "Access check without required permissions");
            return Ok(false);
        }
        ctx.check()?;

        let user = match self.find_user(ctx, user_id).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        let keys = self.resolve(ctx, user.id).await?;
        let allowed = keys.intersects(required);

        LogRecord::new(LogCategory::Access, LogSubcategory::CheckAccess)
            .field("user_id", user.id)
            .field("required", join_keys(required))
            .field("allowed", allowed)
            .emit(Level::DEBUG, "Evaluated access check");

        Ok(allowed)
    }

    /// Same as [`check_access`](Self::check_access) for a user known by email
    pub async fn check_access_by_email(
        &self,
        ctx: &OpContext,
        email: &str,
        required: &[PermissionKey],
    ) -> DomainResult<bool> {
        if required.is_empty() {
            return Ok(false);
        }

        let lookup = ctx.run(self.users.get_by_email(email)).await?;
        let user = lookup.map_err(|e| {
            directory_error(
                LogRecord::new(LogCategory::Access, LogSubcategory::Resolve)
                    .field("email", mask_identifier(email)),
                &e,
            )
        })?;

        match user {
            Some(user) => self.check_access(ctx, user.id, required).await,
            None => Ok(false),
        }
    }

    /// Fail with `AccessDenied` unless the user holds one of `required`
    pub async fn require(
        &self,
        ctx: &OpContext,
        user_id: Uuid,
        required: &[PermissionKey],
    ) -> DomainResult<()> {
        if self.check_access(ctx, user_id, required).await? {
            Ok(())
        } else {
            Err(DomainError::AccessDenied)
        }
    }

    /// The full key set of a user; empty for unknown users
    pub async fn permissions_for(&self, ctx: &OpContext, user_id: Uuid) -> DomainResult<PermissionSet> {
        match self.find_user(ctx, user_id).await? {
            Some(user) => self.resolve(ctx, user.id).await,
            None => Ok(PermissionSet::new()),
        }
    }

    async fn find_user(&self, ctx: &OpContext, user_id: Uuid) -> DomainResult<Option<User>> {
        ctx.run(self.users.get_by_id(user_id)).await?.map_err(|e| {
            directory_error(
                LogRecord::new(LogCategory::Access, LogSubcategory::Resolve).field("user_id", user_id),
                &e,
            )
        })
    }

    /// Read the cached key set, falling back to the directory on a miss
    async fn resolve(&self, ctx: &OpContext, user_id: Uuid) -> DomainResult<PermissionSet> {
        let key = self.cache_key(user_id);
        let cached = ctx.run(self.cache.get(&key)).await?.map_err(|e| {
            server_error(
                LogRecord::new(LogCategory::Access, LogSubcategory::Resolve).field("user_id", user_id),
                &e,
            )
        })?;

        if let Some(raw) = cached {
            match serde_json::from_str::<Vec<PermissionKey>>(&raw) {
                Ok(keys) => return Ok(keys.into_iter().collect()),
                Err(e) => {
                    LogRecord::new(LogCategory::Access, LogSubcategory::Resolve)
                        .field("user_id", user_id)
                        .field("error", e)
                        .emit(Level::WARN, "Discarding undecodable cached permission set");
                }
            }
        }

        let keys = ctx
            .run(self.permissions.get_permission_keys_for_user(user_id))
            .await?
            .map_err(|e| {
                directory_error(
                    LogRecord::new(LogCategory::Access, LogSubcategory::Resolve)
                        .field("user_id", user_id),
                    &e,
                )
            })?;
        let set: PermissionSet = keys.into_iter().collect();

        self.populate(ctx, user_id, &key, &set).await?;
        Ok(set)
    }

    /// Write a freshly fetched key set; a failed write only costs a later miss
    async fn populate(
        &self,
        ctx: &OpContext,
        user_id: Uuid,
        key: &str,
        set: &PermissionSet,
    ) -> DomainResult<()> {
        let raw = match serde_json::to_string(&set.to_sorted_vec()) {
            Ok(raw) => raw,
            Err(e) => {
                LogRecord::new(LogCategory::Access, LogSubcategory::Resolve)
                    .field("user_id", user_id)
                    .field("error", e)
                    .emit(Level::WARN, "Failed to encode permission set");
                return Ok(());
            }
        };

        if let Err(e) = ctx.run(self.cache.set(key, &raw, self.config.ttl)).await? {
            LogRecord::new(LogCategory::Access, LogSubcategory::Resolve)
                .field("user_id", user_id)
                .field("error", e)
                .emit(Level::WARN, "Failed to cache permission set");
        }

        Ok(())
    }
}

fn directory_error(record: LogRecord, error: &DirectoryError) -> DomainError {
    record
        .field("error", error)
        .emit(Level::ERROR, "Directory lookup failed");
    DomainError::Server
}

fn join_keys(keys: &[PermissionKey]) -> String {
    keys.iter()
        .map(PermissionKey::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
