use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{check_feature_access, list_feature_flags, set_feature_grant};

/// Routes any authenticated member may call.
pub fn init_features_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feature_flags))
        .route("/{feature}/access", get(check_feature_access))
}

/// Grant management; the main router guards this with the admin layer.
pub fn init_feature_grants_router() -> Router<AppState> {
    Router::new().route("/grants", put(set_feature_grant))
}
