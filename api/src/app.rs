//! Application state and factory

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use kw_core::{OpContext, PermissionResolver, TokenService};
use kw_shared::{error_codes, ErrorResponse};

use crate::handlers::health::health_check;
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{logout::logout, permissions::my_permissions, revoke::revoke};

/// Services shared by every worker
///
/// Each service is constructed once by the composition root; workers share
/// them through `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub access: Arc<PermissionResolver>,
    /// Deadline applied to each request's service calls
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenService>,
        access: Arc<PermissionResolver>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            tokens,
            access,
            request_timeout,
        }
    }

    /// Execution context for one request
    pub fn request_context(&self) -> OpContext {
        OpContext::with_timeout(self.request_timeout)
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .wrap(JwtAuth::new())
                    .route("/logout", web::post().to(logout))
                    .route("/revoke", web::post().to(revoke))
                    .route("/permissions", web::get().to(my_permissions)),
            ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
