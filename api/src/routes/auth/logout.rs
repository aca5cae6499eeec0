use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer token used for this request. The revocation entry
/// lives until the token would have expired.
///
/// # Response
///
/// - 204 No Content: Token revoked
/// - 401 Unauthorized: Missing, invalid, expired, or already revoked token
/// - 500 Internal Server Error: Revocation could not be stored
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let ctx = state.request_context();
    state
        .tokens
        .logout_token(&ctx, &auth.jti, auth.expires_at)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
