//! Integration tests for JWT authentication middleware

mod common;

use actix_web::{test, web, App, HttpResponse};
use serde_json::Value;

use kw_api::create_app;
use kw_api::middleware::auth::{AuthContext, JwtAuth};
use kw_core::{OpContext, TokenService, TokenServiceConfig};

use common::{bearer, TestContext};

async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "user_id": auth.user_id.to_string(),
        "jti": auth.jti,
    }))
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let ctx = TestContext::new();
    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let ctx = TestContext::new();
    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(bearer("invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_middleware_rejects_token_signed_with_other_secret() {
    let ctx = TestContext::new();
    let foreign = TokenService::new(
        std::sync::Arc::new(kw_core::MemoryCacheStore::new()),
        TokenServiceConfig {
            secret: "someone-else".to_string(),
            ..Default::default()
        },
    );
    let token = foreign
        .generate_token(&OpContext::background(), &uuid::Uuid::new_v4().to_string())
        .await
        .unwrap();

    let app = test::init_service(create_app(ctx.state.clone())).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/permissions")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_middleware_injects_auth_context() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.login(&[]).await;
    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id.to_string());
}

#[actix_web::test]
async fn test_cache_outage_is_server_error() {
    let ctx = TestContext::new();
    let (_, token) = ctx.login(&[]).await;
    ctx.cache.set_failing(true);

    let app = test::init_service(create_app(ctx.state.clone())).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/permissions")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "Internal server error");
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    let app = test::init_service(App::new().route("/protected", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
