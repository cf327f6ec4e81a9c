//! # Vigia Limiter
//!
//! Per-identity ceiling on sensitive (privileged) actions.
//!
//! Unlike the per-IP transport limit on the login endpoints, this limiter
//! keys on the authenticated user id and counts actions against a fixed
//! window that resets as a whole: the first action opens the window, every
//! further action increments the same counter, and when the window elapses
//! the next action opens a fresh one.
//!
//! The check and the increment are a single atomic step on both backends,
//! so concurrent requests cannot slip past the ceiling between a read and a
//! write.

use std::time::Duration;

use uuid::Uuid;

use vigia_core::AppError;

pub mod keys;
mod memory;
mod redis_backend;

pub use memory::MemoryLimiter;
pub use redis_backend::RedisLimiter;

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The action was counted and may proceed.
    Allowed { remaining: u32 },
    /// The ceiling is reached; retry once the window resets.
    Denied { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// A counting backend for the sensitive-action ceiling.
///
/// Two backends exist: an in-process map for single-node deployments and
/// tests, and Redis for deployments where several replicas must share one
/// counter.
#[derive(Clone)]
pub enum ActionLimiter {
    Memory(MemoryLimiter),
    Redis(RedisLimiter),
}

impl ActionLimiter {
    pub fn in_memory() -> Self {
        ActionLimiter::Memory(MemoryLimiter::new())
    }

    pub async fn redis(url: &str) -> Result<Self, AppError> {
        Ok(ActionLimiter::Redis(RedisLimiter::connect(url).await?))
    }

    /// Atomically counts one action for `key` and decides admission.
    ///
    /// A backend failure is an error, not an allow: when the counter cannot
    /// be consulted the action is refused upstream.
    pub async fn try_acquire(
        &self,
        key: &str,
        ceiling: u32,
        window: Duration,
    ) -> Result<RateDecision, AppError> {
        match self {
            ActionLimiter::Memory(limiter) => Ok(limiter.try_acquire(key, ceiling, window)),
            ActionLimiter::Redis(limiter) => limiter.try_acquire(key, ceiling, window).await,
        }
    }

    /// Convenience wrapper keying on a user id.
    pub async fn try_acquire_for_user(
        &self,
        user_id: Uuid,
        ceiling: u32,
        window: Duration,
    ) -> Result<RateDecision, AppError> {
        self.try_acquire(&keys::sensitive_action(user_id), ceiling, window)
            .await
    }
}
