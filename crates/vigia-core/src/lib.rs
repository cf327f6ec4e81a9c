//! # Vigia Core
//!
//! Core types, errors, and utilities for the Vigia API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`features`]: Platform feature-name constants
//! - [`password`]: Secure password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use vigia_core::errors::AppError;
//! use vigia_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Organization not found");
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod features;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
