//! Tenant scope: which organizations a request may touch.
//!
//! Every authenticated request carries exactly one [`TenantScope`], derived
//! from the resolved identity. Handlers and services never read the token's
//! organization claim directly; they ask the scope.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use vigia_core::AppError;

use crate::identity::Identity;

/// The tenant boundary of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", content = "organization_id", rename_all = "snake_case")]
pub enum TenantScope {
    /// Confined to a single organization.
    Bounded(Uuid),
    /// Platform super-admin: no tenant boundary.
    Unbounded,
}

impl TenantScope {
    /// Derives the scope for a resolved identity.
    ///
    /// Super-admins get [`TenantScope::Unbounded`] whether or not they
    /// belong to an organization. Anyone else must belong to one; a regular
    /// user without an organization cannot be scoped and is rejected.
    pub fn for_identity(identity: &Identity) -> Result<Self, AppError> {
        if identity.is_super_admin() {
            return Ok(TenantScope::Unbounded);
        }
        match identity.organization_id {
            Some(org_id) => Ok(TenantScope::Bounded(org_id)),
            None => Err(AppError::NoOrganizationAssigned),
        }
    }

    /// Whether this scope may touch the given organization.
    pub fn allows(&self, organization_id: Uuid) -> bool {
        match self {
            TenantScope::Unbounded => true,
            TenantScope::Bounded(own) => *own == organization_id,
        }
    }

    /// The single organization this scope is bounded to, if any.
    pub fn organization_id(&self) -> Option<Uuid> {
        match self {
            TenantScope::Bounded(id) => Some(*id),
            TenantScope::Unbounded => None,
        }
    }

    /// Resolves the effective organization for an operation.
    ///
    /// A bounded scope always yields its own organization and rejects an
    /// explicit request for a different one. An unbounded scope requires the
    /// caller to name the organization explicitly.
    pub fn resolve_target(&self, requested: Option<Uuid>) -> Result<Uuid, AppError> {
        match self {
            TenantScope::Bounded(own) => match requested {
                Some(req) if req != *own => Err(AppError::forbidden(
                    "Cannot operate on another organization",
                )),
                _ => Ok(*own),
            },
            TenantScope::Unbounded => requested.ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!(
                    "organization_id is required for this operation"
                ))
            }),
        }
    }
}
