//! Permission guard used by handlers

use kw_core::PermissionKey;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Set of permission keys an action requires; any one of them suffices
#[derive(Debug, Clone)]
pub struct RequirePermissions {
    keys: Vec<PermissionKey>,
}

impl RequirePermissions {
    pub fn any_of<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PermissionKey>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> &[PermissionKey] {
        &self.keys
    }

    /// Fail with 403 unless the authenticated user holds one of the keys
    pub async fn enforce(&self, state: &AppState, auth: &AuthContext) -> Result<(), ApiError> {
        let ctx = state.request_context();
        state.access.require(&ctx, auth.user_id, &self.keys).await?;
        Ok(())
    }
}
