//! Redis counting backend.
//!
//! Keeps one counter per key with `INCR`, setting the window TTL when the
//! counter is created. `INCR` is atomic on the server, so replicas sharing
//! the same Redis cannot overshoot the ceiling.
//!
//! A Redis error fails the check closed: the caller sees an upstream error,
//! not an allow.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::warn;

use vigia_core::AppError;

use crate::RateDecision;

#[derive(Clone)]
pub struct RedisLimiter {
    conn: ConnectionManager,
}

impl RedisLimiter {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::upstream_unavailable(anyhow::anyhow!("Invalid Redis URL: {e}")))?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::upstream_unavailable(anyhow::anyhow!("Failed to connect to Redis: {e}"))
        })?;
        Ok(Self { conn })
    }

    pub async fn try_acquire(
        &self,
        key: &str,
        ceiling: u32,
        window: Duration,
    ) -> Result<RateDecision, AppError> {
        let mut conn = self.conn.clone();

        let count: u64 = conn.incr(key, 1).await.map_err(redis_err)?;

        if count == 1 {
            // First action opens the window; the key dies with it.
            let set: bool = conn
                .expire(key, window.as_secs() as i64)
                .await
                .map_err(redis_err)?;
            if !set {
                warn!(key, "Failed to set TTL on rate limit counter");
            }
        }

        if count <= u64::from(ceiling) {
            Ok(RateDecision::Allowed {
                remaining: ceiling - count as u32,
            })
        } else {
            let ttl: i64 = conn.ttl(key).await.map_err(redis_err)?;
            // A counter without TTL (expire failed above) falls back to the
            // full window rather than denying forever.
            let retry_after = if ttl > 0 {
                Duration::from_secs(ttl as u64)
            } else {
                window
            };
            Ok(RateDecision::Denied { retry_after })
        }
    }
}

fn redis_err(e: redis::RedisError) -> AppError {
    AppError::upstream_unavailable(anyhow::anyhow!("Rate limit store unavailable: {e}"))
}
