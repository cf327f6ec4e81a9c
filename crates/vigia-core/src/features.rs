//! Platform feature-name constants.
//!
//! Feature flags are organization-level toggles; the strings here are the
//! canonical names stored in `feature_flags.feature` and
//! `feature_grants.feature`. Using these constants instead of string
//! literals keeps the route guards and the seed data in sync.
//!
//! # Example
//!
//! ```ignore
//! use vigia_core::features;
//!
//! FeatureService::authorize(&db, &ctx, features::REPORTS).await?;
//! ```

/// Personnel management module.
pub const PERSONNEL: &str = "personal";
/// Strategic objectives module.
pub const OBJECTIVES: &str = "objetivos";
/// Measurements / KPIs module.
pub const MEASUREMENTS: &str = "mediciones";
/// Action plans module.
pub const ACTIONS: &str = "acciones";
/// Product catalog module.
pub const PRODUCTS: &str = "productos";
/// Reporting and export module.
pub const REPORTS: &str = "reportes";

/// All feature names known to the platform.
pub fn all() -> Vec<&'static str> {
    vec![PERSONNEL, OBJECTIVES, MEASUREMENTS, ACTIONS, PRODUCTS, REPORTS]
}

/// Whether `name` is a feature the platform defines.
pub fn is_known(name: &str) -> bool {
    all().contains(&name)
}
