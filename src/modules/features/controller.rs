use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use vigia_core::AppError;

use crate::middleware::context::RequestContext;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{FeatureFlag, FeatureGrant, ListFlagsParams, SetGrantRequest};
use super::service::FeaturesService;

/// Check whether the caller may use a feature
///
/// Returns 204 when access is allowed; the error status otherwise. Clients
/// use this to decide which parts of the UI to show.
#[utoipa::path(
    get,
    path = "/api/features/{feature}/access",
    params(("feature" = String, Path, description = "Feature name")),
    responses(
        (status = 204, description = "Access allowed"),
        (status = 400, description = "Unknown feature", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Feature disabled or no grant", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Features"
)]
#[instrument(skip(state, ctx))]
pub async fn check_feature_access(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(feature): Path<String>,
) -> Result<StatusCode, AppError> {
    FeaturesService::authorize(&state.db, &ctx, &feature).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the feature flags of an organization
#[utoipa::path(
    get,
    path = "/api/features",
    params(("organization_id" = Option<Uuid>, Query, description = "Required for super-admins")),
    responses(
        (status = 200, description = "Feature flags", body = Vec<FeatureFlag>),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Outside the caller's tenant scope", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Features"
)]
#[instrument(skip(state, ctx))]
pub async fn list_feature_flags(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<ListFlagsParams>,
) -> Result<Json<Vec<FeatureFlag>>, AppError> {
    let flags =
        FeaturesService::list_flags(&state.db, &ctx.scope, params.organization_id).await?;
    Ok(Json(flags))
}

/// Create or update a per-user feature grant (admin only)
#[utoipa::path(
    put,
    path = "/api/features/grants",
    request_body = SetGrantRequest,
    responses(
        (status = 200, description = "Grant upserted", body = FeatureGrant),
        (status = 400, description = "Unknown feature or missing organization", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Features"
)]
#[instrument(skip(state, ctx, dto))]
pub async fn set_feature_grant(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(dto): ValidatedJson<SetGrantRequest>,
) -> Result<Json<FeatureGrant>, AppError> {
    let grant = FeaturesService::set_grant(&state.db, &ctx.scope, dto).await?;
    Ok(Json(grant))
}
