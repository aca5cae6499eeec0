//! Integration tests for the session endpoints

mod common;

use actix_web::test;
use serde_json::{json, Value};

use kw_api::create_app;
use kw_core::OpContext;

use common::{bearer, TestContext};

#[actix_web::test]
async fn test_health() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_logout_revokes_current_token() {
    let ctx = TestContext::new();
    let (_, token) = ctx.login(&[]).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    // The same token is now rejected
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_logout_requires_authentication() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(ctx.cache.write_count(), 0);
}

#[actix_web::test]
async fn test_permissions_lists_granted_keys() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.login(&["orders.write", "orders.read"]).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/permissions")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id.to_string());
    assert_eq!(body["permissions"], json!(["orders.read", "orders.write"]));
}

#[actix_web::test]
async fn test_revoke_requires_permission() {
    let ctx = TestContext::new();
    let (_, caller) = ctx.login(&["orders.read"]).await;
    let (_, victim) = ctx.login(&[]).await;
    let victim_claims = ctx.state.tokens.decode_jwt(&victim).unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke")
        .insert_header(bearer(&caller))
        .set_json(json!({ "jti": victim_claims.jti, "expires_at": victim_claims.exp }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
    assert!(!ctx
        .state
        .tokens
        .is_revoked(&OpContext::background(), &victim_claims.jti)
        .await
        .unwrap());
}

#[actix_web::test]
async fn test_revoke_other_session() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.login(&["tokens.revoke"]).await;
    let (_, victim) = ctx.login(&[]).await;
    let victim_claims = ctx.state.tokens.decode_jwt(&victim).unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke")
        .insert_header(bearer(&admin))
        .set_json(json!({ "jti": victim_claims.jti, "expires_at": victim_claims.exp }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/permissions")
        .insert_header(bearer(&victim))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_revoke_bounds_entry_lifetime_for_out_of_range_expiry() {
    let ctx = TestContext::new();
    let (_, admin) = ctx.login(&["tokens.revoke"]).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let lifetime = ctx.state.tokens.config().access_token_lifetime.num_seconds() as u64;

    for (jti, expires_at) in [("stale", i64::MIN), ("distant", i64::MAX)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/revoke")
            .insert_header(bearer(&admin))
            .set_json(json!({ "jti": jti, "expires_at": expires_at }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 204);
    }

    assert_eq!(ctx.cache.ttl_of("jwt:stale"), None);
    let ttl = ctx.cache.ttl_of("jwt:distant").unwrap().as_secs();
    assert!(ttl <= lifetime && ttl + 5 >= lifetime);
}
