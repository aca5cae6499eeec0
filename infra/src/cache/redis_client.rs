//! Redis cache client implementation
//!
//! Provides a Redis client with a multiplexed connection, retry logic with
//! exponential backoff, and the two operations the cache store needs: `GET`
//! and `SET ... PX`.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with connection reuse and retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of attempts
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
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

    /// Limit the attempts made per operation, independently of connect retries
    ///
    /// A value of 1 disables retries: the first failure is returned.
    pub fn with_operation_attempts(mut self, attempts: u32) -> Self {
        self.max_retries = attempts.max(1);
        self
    }

    /// Attempts made per operation before a failure is returned
    pub fn operation_attempts(&self) -> u32 {
        self.max_retries
    }

    /// Create multiplexed connection with retry logic
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

            let outcome = timeout(connect_timeout, client.get_multiplexed_async_connection()).await;
            let error = match outcome {
                Ok(Ok(connection)) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Ok(Err(e)) => InfrastructureError::Cache(e),
                Err(_) => InfrastructureError::Timeout(format!(
                    "connect exceeded {}s",
                    connect_timeout.as_secs()
                )),
            };

            if attempts >= max_retries {
                error!("Failed to connect to Redis after {} attempts: {}", attempts, error);
                return Err(error);
            }

            warn!(
                "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                attempts, max_retries, error, delay
            );
            sleep(Duration::from_millis(delay)).await;
            delay = next_delay(delay);
        }
    }

    /// Get a value from cache
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key found
    /// * `Ok(None)` - Key absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        let value = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get key '{}': {}", key, e);
                e
            })?;

        debug!("Key '{}' found: {}", key, value.is_some());
        Ok(value)
    }

    /// Set a value with a millisecond-precision time to live
    ///
    /// Redis rejects a zero expiry, so a zero TTL is written with `PX 1` and
    /// expires immediately.
    pub async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), InfrastructureError> {
        let millis = ttl_millis(ttl);
        debug!("Setting key '{}' with expiry {}ms", key, millis);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(millis)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            e
        })
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
        }
        Ok(response == "PONG")
    }

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Each attempt is bounded by the configured response timeout; only
    /// transient errors are retried.
    async fn execute_with_retry<F, T>(&self, operation: F) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let response_timeout = Duration::from_secs(self.config.response_timeout);
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match timeout(response_timeout, operation(conn)).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) if should_retry(attempts, self.max_retries, &e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Ok(Err(e)) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
                Err(_) => {
                    return Err(InfrastructureError::Timeout(format!(
                        "response exceeded {}s",
                        response_timeout.as_secs()
                    )));
                }
            }
        }
    }
}

/// Expiry in milliseconds for `SET ... PX`, never below one
pub(crate) fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Exponential backoff capped at 5 seconds
pub(crate) fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(5000)
}

/// Whether a failed attempt should be repeated
pub(crate) fn should_retry(attempts: u32, max_attempts: u32, error: &RedisError) -> bool {
    attempts < max_attempts && is_retriable_error(error)
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
    }
    url.to_string()
}
