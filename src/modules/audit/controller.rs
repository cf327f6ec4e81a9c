use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use vigia_core::AppError;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{AuditListParams, AuditRecord};
use super::service::AuditService;

/// Review the security audit trail (super-admin only)
#[utoipa::path(
    get,
    path = "/api/audit",
    params(
        ("limit" = Option<i64>, Query, description = "Max entries (default 100, cap 1000)"),
        ("user_id" = Option<Uuid>, Query, description = "Filter by acting user"),
        ("organization_id" = Option<Uuid>, Query, description = "Filter by organization")
    ),
    responses(
        (status = 200, description = "Audit entries, newest first", body = Vec<AuditRecord>),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 403, description = "Caller is not a super-admin", body = ErrorResponse),
        (status = 429, description = "Sensitive-action ceiling reached"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Audit"
)]
#[instrument(skip(state))]
pub async fn list_audit_log(
    State(state): State<AppState>,
    Query(params): Query<AuditListParams>,
) -> Result<Json<Vec<AuditRecord>>, AppError> {
    let records = AuditService::list(&state.db, params).await?;
    Ok(Json(records))
}
