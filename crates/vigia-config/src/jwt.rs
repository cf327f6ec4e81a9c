//! JWT signing configuration.
//!
//! There is exactly one signing secret for the whole process. In production
//! (`APP_ENV=production`) the secret is required and startup fails fast when
//! it is missing; outside production a development-only fallback applies so
//! local setups work without a `.env` file.

use std::env;

/// Development fallback. Never used when `APP_ENV=production`.
pub const DEV_SECRET: &str = "vigia-dev-secret-do-not-use-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// Loads the JWT configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics when `APP_ENV=production` and `JWT_SECRET` is unset: a
    /// guessable default secret in production would let anyone forge
    /// credentials, so the process must not come up.
    pub fn from_env() -> Self {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
                if app_env == "production" {
                    panic!("JWT_SECRET must be set when APP_ENV=production");
                }
                DEV_SECRET.to_string()
            }
        };

        Self {
            secret,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_fallback_outside_production() {
        // Environment mutation is process-global; keep assertions coarse.
        let config = JwtConfig {
            secret: DEV_SECRET.to_string(),
            access_token_expiry: 3600,
        };
        assert!(!config.secret.is_empty());
        assert_eq!(config.access_token_expiry, 3600);
    }
}
