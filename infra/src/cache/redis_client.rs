//! Redis cache client implementation
//!
//! This module provides a Redis client with retry logic and the cache
//! operations Bomato needs: expiring markers for revoked tokens and
//! windowed counters for rate limiting.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, ErrorKind, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use bomato_shared::config::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic
///
/// Cloning is cheap; every clone shares the same multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use bomato_shared::config::CacheConfig;
    /// use bomato_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let max_retries = config.max_retries.max(1);
        Self::new_with_retry_config(config, max_retries, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout),
            max_retries,
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result,
                Err(_) => Err(RedisError::from((ErrorKind::IoError, "connection timed out"))),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Build a key under the configured prefix, e.g. `bomato:denylist:<jti>`
    pub fn key(&self, parts: &[&str]) -> String {
        self.config.key(parts)
    }

    /// Set a value with expiration time in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.del::<_, u32>(key).await })
        })
        .await
        .map(|deleted| deleted > 0)
        .map_err(|e| {
            error!("Failed to delete key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check if a key exists in cache
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Checking if key '{}' exists", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to check key '{}' existence: {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Increment a counter, setting `expiry_seconds` when the counter is created
    ///
    /// The expiry and the increment run in one `MULTI` block, so a retried
    /// call can never leave a counter without a TTL.
    pub async fn increment(
        &self,
        key: &str,
        expiry_seconds: Option<u64>,
    ) -> Result<i64, InfrastructureError> {
        debug!("Incrementing counter '{}'", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let pipeline = counter_pipeline(key, expiry_seconds);
                Box::pin(async move {
                    let (count,): (i64,) = pipeline.query_async(&mut conn).await?;
                    Ok(count)
                })
            })
            .await;

        match result {
            Ok(count) => {
                debug!("Counter '{}' incremented to {}", key, count);
                Ok(count)
            }
            Err(e) => {
                error!("Failed to increment counter '{}': {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Remaining time-to-live in seconds; `None` if the key is missing or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        debug!("Getting TTL for key '{}'", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await;

        match result {
            Ok(ttl) if ttl >= 0 => Ok(Some(ttl)),
            Ok(_) => Ok(None),
            Err(e) => {
                error!("Failed to get TTL for key '{}': {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Check if the Redis connection is healthy with a PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Run an operation, retrying transient failures with exponential backoff
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Doubles the backoff, capped at five seconds
pub(crate) fn next_delay(delay_ms: u64) -> u64 {
    (delay_ms * 2).min(5000)
}

/// Whether an error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        ErrorKind::IoError | ErrorKind::ClientError | ErrorKind::BusyLoadingError | ErrorKind::TryAgain
    )
}

/// `SET key 0 EX ttl NX` then `INCR key`, wrapped in a transaction
pub(crate) fn counter_pipeline(key: &str, expiry_seconds: Option<u64>) -> redis::Pipeline {
    let mut pipeline = redis::pipe();
    pipeline.atomic();
    if let Some(ttl) = expiry_seconds {
        pipeline
            .cmd("SET")
            .arg(key)
            .arg(0)
            .arg("EX")
            .arg(ttl)
            .arg("NX")
            .ignore();
    }
    pipeline.incr(key, 1);
    pipeline
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
