use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One audit event, as produced by the audit middleware.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub action: String,
    pub user_id: Uuid,
    pub user_email: String,
    pub organization_id: Option<Uuid>,
    pub method: String,
    pub path: String,
    pub params: Option<serde_json::Value>,
    pub status: i32,
}

/// A stored audit event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditRecord {
    pub id: i64,
    pub action: String,
    pub user_id: Uuid,
    pub user_email: String,
    pub organization_id: Option<Uuid>,
    pub method: String,
    pub path: String,
    #[schema(value_type = Option<Object>)]
    pub params: Option<serde_json::Value>,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for reviewing the trail.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuditListParams {
    pub limit: Option<i64>,
    pub user_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
}
