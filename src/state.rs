use sqlx::PgPool;

use vigia_config::{CorsConfig, JwtConfig, RateLimitConfig};
use vigia_limiter::ActionLimiter;

use crate::config::database::init_db_pool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub limiter: ActionLimiter,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        limiter: init_limiter().await,
    }
}

/// Picks the sensitive-action counter backend.
///
/// With `REDIS_URL` set the counters are shared across replicas; without it
/// each process keeps its own map, which is correct for single-node
/// deployments and tests.
async fn init_limiter() -> ActionLimiter {
    match std::env::var("REDIS_URL") {
        Ok(url) if !url.is_empty() => ActionLimiter::redis(&url)
            .await
            .expect("Failed to connect to Redis rate limit store"),
        _ => ActionLimiter::in_memory(),
    }
}
