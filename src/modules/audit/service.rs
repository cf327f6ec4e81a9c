use sqlx::PgPool;
use tracing::instrument;

use vigia_core::AppError;

use crate::config::database;

use super::model::{AuditEntry, AuditListParams, AuditRecord};

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

pub struct AuditService;

impl AuditService {
    /// Inserts one audit event.
    ///
    /// Callers on the request path must not await this inline; the audit
    /// middleware spawns it and logs failures instead of propagating them.
    #[instrument(skip(db, entry), fields(action = %entry.action, user_id = %entry.user_id))]
    pub async fn record(db: &PgPool, entry: AuditEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO audit_log
                 (action, user_id, user_email, organization_id, method, path, params, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&entry.action)
        .bind(entry.user_id)
        .bind(&entry.user_email)
        .bind(entry.organization_id)
        .bind(&entry.method)
        .bind(&entry.path)
        .bind(&entry.params)
        .bind(entry.status)
        .execute(db)
        .await?;

        Ok(())
    }

    /// Lists recent events, newest first. Reachable only through the
    /// super-admin route.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, params: AuditListParams) -> Result<Vec<AuditRecord>, AppError> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let query = sqlx::query_as::<_, AuditRecord>(
            "SELECT id, action, user_id, user_email, organization_id, method, path,
                    params, status, created_at
             FROM audit_log
             WHERE ($1::uuid IS NULL OR user_id = $1)
               AND ($2::uuid IS NULL OR organization_id = $2)
             ORDER BY created_at DESC
             LIMIT $3",
        )
        .bind(params.user_id)
        .bind(params.organization_id)
        .bind(limit)
        .fetch_all(db);

        database::bounded("Audit trail read", query).await
    }
}
