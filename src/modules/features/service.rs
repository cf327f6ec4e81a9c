use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use vigia_core::{AppError, features};
use vigia_models::{Identity, TenantScope};

use crate::config::database;
use crate::middleware::context::RequestContext;

use super::model::{FeatureFlag, FeatureGrant, SetGrantRequest};

pub struct FeaturesService;

impl FeaturesService {
    /// The feature decision itself, independent of storage.
    ///
    /// Tier order is load-bearing:
    ///
    /// 1. The organization flag must be on; a missing row counts as off, and
    ///    an off flag denies everyone, administrators and grant holders
    ///    included. A disabled feature cannot be resurrected by a stray
    ///    grant.
    /// 2. An active grant (or the feature in the user's permission list)
    ///    allows.
    /// 3. Without a grant, administrators of either tier pass: organization
    ///    admins implicitly hold every enabled feature.
    pub fn decide(
        flag_enabled: Option<bool>,
        has_grant: bool,
        is_admin: bool,
        feature: &str,
    ) -> Result<(), AppError> {
        if flag_enabled != Some(true) {
            return Err(AppError::feature_disabled(feature));
        }

        if has_grant {
            return Ok(());
        }

        if is_admin {
            debug!(feature, "Feature access granted by administrator role");
            return Ok(());
        }

        Err(AppError::insufficient_permission(feature))
    }

    /// [`Self::decide`] for a concrete identity, logging the denial with who
    /// asked and why.
    fn decide_for(
        identity: &Identity,
        flag_enabled: Option<bool>,
        has_grant: bool,
        feature: &str,
    ) -> Result<(), AppError> {
        let result = Self::decide(flag_enabled, has_grant, identity.is_admin(), feature);
        if let Err(err) = &result {
            warn!(
                user_id = %identity.id,
                feature,
                reason = ?err,
                "Feature access denied"
            );
        }
        result
    }

    /// Runs the three-tier check for the request's identity.
    ///
    /// Features are always evaluated against the identity's own
    /// organization; an identity without one (including an org-less
    /// super-admin) has no feature context and is rejected.
    #[instrument(skip(db, ctx), fields(user_id = %ctx.identity.id, feature = %feature))]
    pub async fn authorize(
        db: &PgPool,
        ctx: &RequestContext,
        feature: &str,
    ) -> Result<(), AppError> {
        if !features::is_known(feature) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Unknown feature '{feature}'"
            )));
        }

        let org_id = ctx
            .identity
            .organization_id
            .ok_or(AppError::NoOrganizationAssigned)?;

        let flag_enabled = Self::flag_enabled(db, org_id, feature).await?;

        // The store is only consulted for a grant when the flag is on and
        // the user row does not already carry the permission.
        let has_permission = ctx.identity.permissions.iter().any(|p| p == feature);
        let has_grant = has_permission
            || (flag_enabled == Some(true)
                && Self::has_active_grant(db, org_id, ctx.identity.id, feature).await?);

        Self::decide_for(&ctx.identity, flag_enabled, has_grant, feature)
    }

    async fn flag_enabled(
        db: &PgPool,
        organization_id: Uuid,
        feature: &str,
    ) -> Result<Option<bool>, AppError> {
        let query = sqlx::query_scalar::<_, bool>(
            "SELECT enabled FROM feature_flags WHERE organization_id = $1 AND feature = $2",
        )
        .bind(organization_id)
        .bind(feature)
        .fetch_optional(db);

        database::bounded("Feature flag lookup", query).await
    }

    async fn has_active_grant(
        db: &PgPool,
        organization_id: Uuid,
        user_id: Uuid,
        feature: &str,
    ) -> Result<bool, AppError> {
        let query = sqlx::query_scalar::<_, bool>(
            "SELECT active FROM feature_grants
             WHERE organization_id = $1 AND user_id = $2 AND feature = $3",
        )
        .bind(organization_id)
        .bind(user_id)
        .bind(feature)
        .fetch_optional(db);

        let active = database::bounded("Feature grant lookup", query).await?;

        // An inactive grant row is the same as no row.
        Ok(active == Some(true))
    }

    /// Upserts a per-user grant within the caller's scope.
    #[instrument(skip(db, scope, dto), fields(user_id = %dto.user_id, feature = %dto.feature))]
    pub async fn set_grant(
        db: &PgPool,
        scope: &TenantScope,
        dto: SetGrantRequest,
    ) -> Result<FeatureGrant, AppError> {
        if !features::is_known(&dto.feature) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Unknown feature '{}'",
                dto.feature
            )));
        }

        let organization_id = scope.resolve_target(dto.organization_id)?;

        let query = sqlx::query_as::<_, FeatureGrant>(
            "INSERT INTO feature_grants (organization_id, user_id, feature, active)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (organization_id, user_id, feature)
             DO UPDATE SET active = EXCLUDED.active
             RETURNING organization_id, user_id, feature, active",
        )
        .bind(organization_id)
        .bind(dto.user_id)
        .bind(&dto.feature)
        .bind(dto.active)
        .fetch_one(db);

        database::bounded("Feature grant upsert", query).await
    }

    /// Lists the flags of one organization within the caller's scope.
    #[instrument(skip(db, scope))]
    pub async fn list_flags(
        db: &PgPool,
        scope: &TenantScope,
        requested: Option<Uuid>,
    ) -> Result<Vec<FeatureFlag>, AppError> {
        let organization_id = scope.resolve_target(requested)?;

        let query = sqlx::query_as::<_, FeatureFlag>(
            "SELECT organization_id, feature, enabled
             FROM feature_flags WHERE organization_id = $1 ORDER BY feature",
        )
        .bind(organization_id)
        .fetch_all(db);

        database::bounded("Feature flag listing", query).await
    }
}
