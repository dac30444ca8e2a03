//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Bomato backend.
//! It provides concrete implementations for the repository traits defined in
//! `bomato_core`, plus explicit connection lifecycle management.
//!
//! ## Architecture
//!
//! - **Database**: MySQL user store using SQLx, with embedded migrations
//! - **Cache**: Redis client, the access token denylist and request counters

use std::collections::BTreeMap;

use bomato_core::errors::DomainError;
use bomato_shared::config::AppConfig;
use bomato_shared::types::ServiceHealth;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

pub use cache::{RedisClient, RedisTokenRepository};
pub use database::{DatabasePool, MySqlUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::internal(error.to_string())
    }
}

/// Connected infrastructure clients, constructed once at startup
#[derive(Clone)]
pub struct Infrastructure {
    pub database: DatabasePool,
    pub cache: RedisClient,
}

impl Infrastructure {
    /// Connect to MySQL (running migrations) and Redis
    pub async fn initialize(config: &AppConfig) -> Result<Self, InfrastructureError> {
        tracing::info!("Initializing infrastructure services...");

        let database = DatabasePool::new(config.database.clone()).await?;
        database.run_migrations().await?;

        let cache = RedisClient::new(config.cache.clone()).await?;

        tracing::info!("Infrastructure services initialized successfully");
        Ok(Self { database, cache })
    }

    /// User store backed by the connection pool
    pub fn user_repository(&self) -> MySqlUserRepository {
        MySqlUserRepository::new(self.database.get_pool().clone())
    }

    /// Access token denylist backed by Redis
    pub fn token_repository(&self) -> RedisTokenRepository {
        RedisTokenRepository::new(self.cache.clone())
    }

    /// Health of each dependency, keyed by name
    pub async fn health(&self) -> BTreeMap<String, ServiceHealth> {
        let mut services = BTreeMap::new();
        services.insert("database".to_string(), to_health(self.database.health_check().await));
        services.insert("cache".to_string(), to_health(self.cache.health_check().await));
        services
    }

    /// Close connections; call after the HTTP server has stopped
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down infrastructure services...");
        self.database.close().await;
        tracing::info!("Infrastructure services shut down");
    }
}

fn to_health(result: Result<bool, InfrastructureError>) -> ServiceHealth {
    match result {
        Ok(true) => ServiceHealth::healthy(),
        Ok(false) => ServiceHealth::unhealthy("unexpected health check response"),
        Err(e) => ServiceHealth::unhealthy(e.to_string()),
    }
}
