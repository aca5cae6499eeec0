//! Shared fixtures for API tests

use actix_web::web;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use kw_api::AppState;
use kw_core::{
    MemoryCacheStore, MockPermissionDirectory, MockUserDirectory, OpContext, PermissionResolver,
    PermissionResolverConfig, TokenService, TokenServiceConfig, User,
};

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub cache: MemoryCacheStore,
    pub users: MockUserDirectory,
    pub permissions: MockPermissionDirectory,
}

impl TestContext {
    pub fn new() -> Self {
        let cache = MemoryCacheStore::new();
        let users = MockUserDirectory::new();
        let permissions = MockPermissionDirectory::new();

        let tokens = TokenService::new(
            Arc::new(cache.clone()),
            TokenServiceConfig {
                secret: "api-test-secret".to_string(),
                ..Default::default()
            },
        );
        let access = PermissionResolver::new(
            Arc::new(users.clone()),
            Arc::new(permissions.clone()),
            Arc::new(cache.clone()),
            PermissionResolverConfig::default(),
        );

        let state = web::Data::new(AppState::new(
            Arc::new(tokens),
            Arc::new(access),
            Duration::from_secs(2),
        ));

        Self {
            state,
            cache,
            users,
            permissions,
        }
    }

    /// Register a user with the given permissions and issue a token for them
    pub async fn login(&self, granted: &[&str]) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        self.users
            .insert(User::new(user_id, format!("{}@example.com", user_id)))
            .await;
        self.permissions.grant(user_id, granted).await;

        let token = self
            .state
            .tokens
            .generate_token(&OpContext::background(), &user_id.to_string())
            .await
            .unwrap();
        (user_id, token)
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
