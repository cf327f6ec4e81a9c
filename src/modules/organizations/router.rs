use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_organization, get_organization_stats, list_organizations};

/// Routes any authenticated member may call; scoping happens in the service.
pub fn init_organizations_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_organization))
        .route("/{id}/stats", get(get_organization_stats))
}

/// Platform-level routes; the main router guards these with the super-admin
/// layer and the sensitive-action limiter.
pub fn init_organizations_admin_router() -> Router<AppState> {
    Router::new().route("/", get(list_organizations))
}
