use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::list_audit_log;

/// The main router guards this with the super-admin layer.
pub fn init_audit_router() -> Router<AppState> {
    Router::new().route("/", get(list_audit_log))
}
