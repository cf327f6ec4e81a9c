//! Feature-permission middleware.
//!
//! Routes belonging to a product feature declare it once; the middleware
//! runs the three-tier check (organization flag, explicit grant, then
//! administrator fallback) before the handler sees the request.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use vigia_core::AppError;

use crate::middleware::context::RequestContext;
use crate::modules::features::service::FeaturesService;
use crate::state::AppState;

/// Middleware function gating a route behind a feature.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let report_routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_feature(state, req, next, features::REPORTS)
///     ));
/// ```
pub async fn require_feature(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    feature: &'static str,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let ctx = RequestContext::from_request_parts(&mut parts, &state).await?;
    FeaturesService::authorize(&state.db, &ctx, feature).await?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
