//! # Vigia Config
//!
//! Configuration types for the Vigia API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT signing configuration (required secret in production)
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rate_limit`]: Transport and sensitive-action rate limiting configuration
//!
//! # Example
//!
//! ```ignore
//! use vigia_config::{JwtConfig, CorsConfig, RateLimitConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
