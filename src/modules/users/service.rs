use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use vigia_core::AppError;
use vigia_models::Identity;

use crate::config::database;

use super::model::IdentityRow;

pub struct UsersService;

impl UsersService {
    /// Resolves a verified token subject to its authoritative identity.
    ///
    /// Only active users resolve; an unknown id and a deactivated user are
    /// deliberately the same error, so a stolen token cannot be used to
    /// discover which accounts exist. The organization join is best-effort:
    /// a dangling `organization_id` leaves the enrichment empty without
    /// failing the lookup.
    #[instrument(skip(db), fields(user_id = %user_id))]
    pub async fn resolve_identity(db: &PgPool, user_id: Uuid) -> Result<Identity, AppError> {
        let query = sqlx::query_as::<_, IdentityRow>(
            "SELECT u.id, u.email, u.name, u.role, u.permissions, u.organization_id,
                    o.id AS org_id, o.name AS org_name, o.plan AS org_plan, o.active AS org_active
             FROM users u
             LEFT JOIN organizations o ON o.id = u.organization_id
             WHERE u.id = $1 AND u.active = true",
        )
        .bind(user_id)
        .fetch_optional(db);

        let row = database::bounded("Identity lookup", query)
            .await?
            .ok_or(AppError::InactiveOrUnknownUser)?;

        if row.organization_id.is_some() && row.org_id.is_none() {
            warn!(
                user_id = %user_id,
                organization_id = ?row.organization_id,
                "User references a missing organization"
            );
        }

        debug!(user_id = %user_id, role = %row.role, "Identity resolved");
        Ok(row.into_identity())
    }
}
