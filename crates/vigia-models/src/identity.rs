//! The resolved identity attached to every authenticated request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::organization::OrganizationSummary;

/// Role of a user within the platform.
///
/// Stored as plain text in the database and on the wire. Unknown values are
/// preserved as [`Role::Custom`] rather than rejected, so a deployment can
/// introduce roles without a schema change; such roles carry no built-in
/// privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
    Custom(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Custom(s) => s,
        }
    }

    /// Administrators of either tier pass every role gate.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "user" => Role::User,
            "admin" => Role::Admin,
            "super_admin" => Role::SuperAdmin,
            _ => Role::Custom(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user as resolved from the user store.
///
/// This is the authoritative identity for the request: role, organization
/// and permission grants come from the store, never from token claims. Only
/// active users resolve; an inactive row is treated as unknown upstream.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Owning organization. `None` only for platform super-admins.
    pub organization_id: Option<Uuid>,
    /// Explicit feature permissions carried on the user row.
    pub permissions: Vec<String>,
    /// Enriched organization snapshot, when the user belongs to one that
    /// still exists. Enrichment is best-effort: a missing organization row
    /// leaves this `None` without failing resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationSummary>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }
}
