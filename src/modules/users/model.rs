use sqlx::FromRow;
use uuid::Uuid;

use vigia_models::{Identity, OrganizationSummary, Plan, Role};

/// One row of the identity query: the user joined with its organization.
///
/// The organization columns come from a LEFT JOIN and are all-or-nothing:
/// either the user's organization row exists and they are populated, or the
/// user has no (surviving) organization and they are NULL.
#[derive(Debug, FromRow)]
pub struct IdentityRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub organization_id: Option<Uuid>,
    pub org_id: Option<Uuid>,
    pub org_name: Option<String>,
    pub org_plan: Option<Plan>,
    pub org_active: Option<bool>,
}

impl IdentityRow {
    pub fn into_identity(self) -> Identity {
        let organization = match (self.org_id, self.org_name, self.org_plan, self.org_active) {
            (Some(id), Some(name), Some(plan), Some(active)) => Some(OrganizationSummary {
                id,
                name,
                plan,
                active,
            }),
            _ => None,
        };

        Identity {
            id: self.id,
            email: self.email,
            name: self.name,
            role: Role::from(self.role),
            organization_id: self.organization_id,
            permissions: self.permissions,
            organization,
        }
    }
}
