use actix_web::{web, HttpResponse};
use serde::Serialize;

use kw_core::PermissionKey;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    pub user_id: uuid::Uuid,
    pub permissions: Vec<PermissionKey>,
    pub session_expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Handler for GET /api/v1/auth/permissions
///
/// Lists the permission keys of the authenticated user.
pub async fn my_permissions(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let ctx = state.request_context();
    let permissions = state.access.permissions_for(&ctx, auth.user_id).await?;

    Ok(HttpResponse::Ok().json(PermissionsResponse {
        user_id: auth.user_id,
        permissions: permissions.to_sorted_vec(),
        session_expires_at: auth.expires_at_utc(),
    }))
}
