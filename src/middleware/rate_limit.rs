//! Per-identity sensitive-action rate limiting.
//!
//! Distinct from the per-IP transport limit on login: this layer counts
//! privileged actions per authenticated user, across the whole group of
//! routes it wraps. The check-and-increment is atomic in the limiter
//! backend, so concurrent requests cannot overshoot the ceiling.

use std::time::Duration;

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use vigia_core::AppError;

use crate::middleware::context::RequestContext;
use crate::state::AppState;

pub async fn limit_sensitive_actions(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let ctx = RequestContext::from_request_parts(&mut parts, &state).await?;

    let ceiling = state.rate_limit_config.sensitive_max_actions;
    let window = Duration::from_secs(state.rate_limit_config.sensitive_window_secs);

    let decision = state
        .limiter
        .try_acquire_for_user(ctx.identity.id, ceiling, window)
        .await?;

    match decision {
        vigia_limiter::RateDecision::Allowed { .. } => {
            let req = Request::from_parts(parts, body);
            Ok(next.run(req).await)
        }
        vigia_limiter::RateDecision::Denied { retry_after } => {
            warn!(
                user_id = %ctx.identity.id,
                retry_after_secs = retry_after.as_secs(),
                "Sensitive-action ceiling reached"
            );
            // Round up so the client never retries a second early.
            let secs = retry_after.as_secs_f64().ceil() as u64;
            Err(AppError::rate_limited(secs.max(1)))
        }
    }
}
