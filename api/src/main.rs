use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use auth_api::app::create_app;
use auth_api::routes::auth::AppState;
use auth_api::telemetry::init_tracing;
use auth_core::services::token::{
    KeyMaterial, TokenCleanupService, TokenLifecycleService, TokenServiceConfig,
};
use auth_infra::{DatabasePool, MySqlTokenStore};
use auth_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().map_err(anyhow::Error::msg)?;

    init_tracing(&config.logging);
    info!(environment = %config.environment, "Starting token service");

    // Refuse to serve without a usable key pair
    let keys = Arc::new(KeyMaterial::from_config(&config.jwt).context("Failed to load signing keys")?);

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    pool.health_check()
        .await
        .context("Database health check failed")?;
    info!(pool = %pool.get_statistics(), "Database pool ready");
    let store = Arc::new(MySqlTokenStore::new(pool.get_pool().clone()));
    store.migrate().await.context("Failed to prepare token store schema")?;

    let token_service = Arc::new(TokenLifecycleService::new(
        store,
        keys,
        TokenServiceConfig::from_configs(&config.jwt, &config.database),
    ));

    let cleanup = Arc::new(TokenCleanupService::new(
        token_service.clone(),
        config.cleanup.clone(),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(token_service));
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    pool.close().await;

    Ok(())
}
