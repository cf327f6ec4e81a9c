use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Organization-level switch for one feature.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeatureFlag {
    pub organization_id: Uuid,
    pub feature: String,
    pub enabled: bool,
}

/// Per-user grant for one feature within an organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeatureGrant {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub feature: String,
    pub active: bool,
}

/// Body of the admin grant upsert.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetGrantRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "feature is required"))]
    pub feature: String,
    pub active: bool,
    /// Required for super-admins; organization admins may omit it (their
    /// own organization applies) but cannot name a foreign one.
    pub organization_id: Option<Uuid>,
}

/// Query parameters for listing flags.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListFlagsParams {
    /// Required for super-admins; bounded callers may only name their own.
    pub organization_id: Option<Uuid>,
}
