use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use vigia_core::AppError;
use vigia_models::{Organization, OrganizationStats, TenantScope};

use crate::config::database;

pub struct OrganizationsService;

impl OrganizationsService {
    /// Fetches one organization, enforcing the caller's tenant scope.
    ///
    /// A bounded caller asking for a foreign organization is rejected before
    /// the store is consulted, so the response does not reveal whether the
    /// organization exists.
    #[instrument(skip(db), fields(organization_id = %id))]
    pub async fn get_organization(
        db: &PgPool,
        scope: &TenantScope,
        id: Uuid,
    ) -> Result<Organization, AppError> {
        if !scope.allows(id) {
            return Err(AppError::forbidden(
                "Cannot access another organization",
            ));
        }

        let query = sqlx::query_as::<_, Organization>(
            "SELECT id, name, plan, active, total_personnel, total_departments,
                    total_positions, total_users, created_at, updated_at
             FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db);

        database::bounded("Organization lookup", query)
            .await?
            .ok_or_else(|| AppError::not_found("Organization not found"))
    }

    /// Aggregate counters for one organization, same scoping rules as
    /// [`Self::get_organization`].
    #[instrument(skip(db), fields(organization_id = %id))]
    pub async fn get_stats(
        db: &PgPool,
        scope: &TenantScope,
        id: Uuid,
    ) -> Result<OrganizationStats, AppError> {
        let organization = Self::get_organization(db, scope, id).await?;
        Ok(organization.stats())
    }

    /// Lists all organizations. Reachable only through the super-admin
    /// route, so no scope parameter.
    #[instrument(skip(db))]
    pub async fn list_organizations(db: &PgPool) -> Result<Vec<Organization>, AppError> {
        let query = sqlx::query_as::<_, Organization>(
            "SELECT id, name, plan, active, total_personnel, total_departments,
                    total_positions, total_users, created_at, updated_at
             FROM organizations ORDER BY name",
        )
        .fetch_all(db);

        database::bounded("Organization listing", query).await
    }
}
