use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{login_user, me};

/// Credential-issuing routes. The main router wraps these in the per-IP
/// governor, so they are kept separate from the session routes.
pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login_user))
}

/// Session routes for already-authenticated callers.
pub fn init_session_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
