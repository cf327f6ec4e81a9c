//! # Vigia Auth
//!
//! Credential verification for the Vigia API.
//!
//! This crate owns the JWT layer: claim structures (including the legacy
//! `userId` subject shim), token signing and pure verification. Resolving a
//! verified subject against the user store lives in the API crate, not here.

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RawClaims};
pub use jwt::{create_access_token, verify_token};
