use actix_web::{web, HttpServer};
use anyhow::{anyhow, bail, Context};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use kw_api::{create_app, telemetry, AppState};
use kw_api::directory::DirectorySeed;
use kw_core::{
    CacheStore, MemoryCacheStore, PermissionResolver, PermissionResolverConfig, TokenService,
    TokenServiceConfig,
};
use kw_infra::cache::RedisCacheStore;
use kw_shared::config::{AppConfig, CacheType};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging)?;
    config.validate().map_err(|e| anyhow!(e))?;

    info!(environment = %config.environment, "Starting Keyward API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let cache: Arc<dyn CacheStore> = match config.cache.cache_type {
        CacheType::Redis => Arc::new(
            RedisCacheStore::connect(config.cache.clone())
                .await
                .context("failed to connect to Redis")?,
        ),
        CacheType::Memory => {
            if config.environment.is_production() {
                bail!("CACHE_TYPE=memory is not allowed in production");
            }
            warn!("Using in-process cache; state is lost on restart");
            Arc::new(MemoryCacheStore::new())
        }
    };

    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)?;
    let tokens = Arc::new(TokenService::new(cache.clone(), token_config));

    let seed = match &config.auth.directory_seed_file {
        Some(path) => DirectorySeed::load(path)?,
        None => {
            warn!("DIRECTORY_SEED_FILE is not set; no user holds any permission");
            DirectorySeed { users: Vec::new() }
        }
    };
    info!(users = seed.users.len(), "Loaded user directory seed");
    let directories = seed.into_directories().await;
    let access = Arc::new(PermissionResolver::new(
        Arc::new(directories.users),
        Arc::new(directories.permissions),
        cache,
        PermissionResolverConfig::from_cache_config(&config.auth.permissions),
    ));

    let state = web::Data::new(AppState::new(
        tokens,
        access,
        Duration::from_millis(config.server.request_timeout_ms),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
