//! # Vigia Models
//!
//! Domain models shared across the Vigia API: resolved identities, roles,
//! organizations and the tenant scope derived from them.

pub mod identity;
pub mod organization;
pub mod scope;

pub use identity::{Identity, Role};
pub use organization::{Organization, OrganizationStats, OrganizationSummary, Plan};
pub use scope::TenantScope;
