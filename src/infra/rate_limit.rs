//! Fixed-window request counters for rate limiting.
//!
//! Redis backs the counter when configured so limits hold across
//! instances; otherwise a process-local map is used.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::config::CACHE_PREFIX_RATE_LIMIT;
use crate::errors::{AppError, AppResult};

/// Entries kept by the in-memory limiter before expired windows are swept
const IN_MEMORY_SWEEP_THRESHOLD: usize = 10_000;

/// Counts requests per client identifier within a fixed window.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one request for `identifier`.
    ///
    /// Returns the request count in the current window and whether the
    /// request is within `max_requests`.
    async fn check(&self, identifier: &str, max_requests: u64, window_seconds: u64) -> AppResult<(u64, bool)>;
}

/// Redis-backed limiter with connection pooling.
#[derive(Clone)]
pub struct RedisRateLimiter {
    connection: ConnectionManager,
}

impl RedisRateLimiter {
    pub async fn connect(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis rate limiter connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, identifier: &str, max_requests: u64, window_seconds: u64) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let count: u64 = conn.incr(&key, 1u64).await.map_err(cache_error)?;

        // First request opens the window
        if count == 1 {
            let _: () = conn
                .expire(&key, window_seconds as i64)
                .await
                .map_err(cache_error)?;
        }

        Ok((count, count <= max_requests))
    }
}

/// Process-local limiter
#[derive(Default)]
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, (Instant, u64)>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, identifier: &str, max_requests: u64, window_seconds: u64) -> AppResult<(u64, bool)> {
        let now = Instant::now();
        let window = Duration::from_secs(window_seconds);
        let mut windows = self.windows.lock().await;

        if windows.len() > IN_MEMORY_SWEEP_THRESHOLD {
            windows.retain(|_, (started, _)| now.duration_since(*started) < window);
        }

        let entry = windows
            .entry(identifier.to_string())
            .or_insert((now, 0));

        if now.duration_since(entry.0) >= window {
            *entry = (now, 0);
        }
        entry.1 += 1;

        Ok((entry.1, entry.1 <= max_requests))
    }
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
