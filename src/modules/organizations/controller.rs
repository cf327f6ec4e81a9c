use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use vigia_core::AppError;
use vigia_models::{Organization, OrganizationStats};

use crate::middleware::context::RequestContext;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::service::OrganizationsService;

/// Get an organization by id (own organization, or any for super-admins)
#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    params(("id" = Uuid, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization found", body = Organization),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Outside the caller's tenant scope", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Organizations"
)]
#[instrument(skip(state, ctx))]
pub async fn get_organization(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Organization>, AppError> {
    let organization = OrganizationsService::get_organization(&state.db, &ctx.scope, id).await?;
    Ok(Json(organization))
}

/// Get aggregate counters for an organization
#[utoipa::path(
    get,
    path = "/api/organizations/{id}/stats",
    params(("id" = Uuid, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization stats", body = OrganizationStats),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Outside the caller's tenant scope", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Organizations"
)]
#[instrument(skip(state, ctx))]
pub async fn get_organization_stats(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizationStats>, AppError> {
    let stats = OrganizationsService::get_stats(&state.db, &ctx.scope, id).await?;
    Ok(Json(stats))
}

/// List all organizations (super-admin only)
#[utoipa::path(
    get,
    path = "/api/organizations",
    responses(
        (status = 200, description = "All organizations", body = Vec<Organization>),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Caller is not a super-admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Organizations"
)]
#[instrument(skip(state))]
pub async fn list_organizations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Organization>>, AppError> {
    let organizations = OrganizationsService::list_organizations(&state.db).await?;
    Ok(Json(organizations))
}
