//! Rate limiting configuration.
//!
//! Two distinct limits live here:
//!
//! - A per-IP token-bucket limit on the credential-issuing endpoints
//!   (login), served by `tower_governor`. This is transport-level brute-force
//!   protection.
//! - The per-identity sensitive-action limit (`sensitive_max_actions` within
//!   `sensitive_window_secs`), enforced by the `vigia-limiter` crate on
//!   super-administrator routes. This one has rolling-window-by-reset
//!   semantics and a `Retry-After` hint on denial.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_AUTH_PER_SECOND`: token refill rate for auth endpoints (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: burst size for auth endpoints (default: 5)
//! - `SENSITIVE_MAX_ACTIONS`: sensitive-action ceiling per identity (default: 5)
//! - `SENSITIVE_WINDOW_SECS`: sensitive-action window length (default: 60)

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per second for auth endpoints (per client IP).
    pub auth_per_second: u64,
    /// Burst size for auth endpoints (per client IP).
    pub auth_burst_size: u32,
    /// Ceiling of privileged actions one identity may perform per window.
    pub sensitive_max_actions: u32,
    /// Window length in seconds for the sensitive-action ceiling.
    pub sensitive_window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_second: 10,
            auth_burst_size: 5,
            sensitive_max_actions: 5,
            sensitive_window_secs: 60,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            sensitive_max_actions: std::env::var("SENSITIVE_MAX_ACTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            sensitive_window_secs: std::env::var("SENSITIVE_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Creates a `GovernorConfig` for the credential-issuing endpoints.
    ///
    /// Keys on the client IP (honoring `X-Forwarded-For` behind a proxy), so
    /// each address has its own bucket.
    ///
    /// # Panics
    ///
    /// Panics if the governor configuration cannot be built, which only
    /// happens with a zero rate or burst.
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
        assert_eq!(config.sensitive_max_actions, 5);
        assert_eq!(config.sensitive_window_secs, 60);
    }

    #[test]
    fn test_config_clone_and_eq() {
        let config = RateLimitConfig::default();
        assert_eq!(config, config.clone());
    }
}
