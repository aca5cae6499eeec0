use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;
use crate::middleware::permission::RequirePermissions;

use super::REVOKE_PERMISSION;

/// Request body for revoking a session by JWT ID
#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    pub jti: String,
    /// Expiry of the revoked token as a Unix timestamp
    pub expires_at: i64,
}

/// Handler for POST /api/v1/auth/revoke
///
/// Revokes another session's token. Requires the `tokens.revoke` permission.
///
/// # Response
///
/// - 204 No Content: Token revoked
/// - 403 Forbidden: Caller lacks the permission
pub async fn revoke(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<RevokeRequest>,
) -> Result<HttpResponse, ApiError> {
    RequirePermissions::any_of([REVOKE_PERMISSION])
        .enforce(&state, &auth)
        .await?;

    let ctx = state.request_context();
    state
        .tokens
        .logout_token(&ctx, &body.jti, body.expires_at)
        .await?;

    tracing::info!(revoked_by = %auth.user_id, jti = %body.jti, "Session revoked");
    Ok(HttpResponse::NoContent().finish())
}
