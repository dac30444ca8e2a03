use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;

use bomato_api::app::{create_app, Services};
use bomato_api::middleware::rate_limit::RedisRequestCounter;
use bomato_api::telemetry::init_tracing;
use bomato_infra::Infrastructure;
use bomato_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Bomato API server");

    let infrastructure = Infrastructure::initialize(&config)
        .await
        .context("Failed to initialize infrastructure")?;

    let services = Services::new(
        &config,
        Arc::new(infrastructure.user_repository()),
        infrastructure.token_repository(),
        Arc::new(RedisRequestCounter::new(infrastructure.cache.clone())),
        Arc::new(infrastructure.clone()),
    );

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server listening");

    let app_config = config.clone();
    HttpServer::new(move || create_app(&app_config, &services))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped, closing connections");
    infrastructure.shutdown().await;

    Ok(())
}
