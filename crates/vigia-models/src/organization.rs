//! Organization (tenant) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Subscription plan of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Professional,
    Enterprise,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Professional => "professional",
            Plan::Enterprise => "enterprise",
        }
    }
}

/// A tenant organization row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub plan: Plan,
    pub active: bool,
    pub total_personnel: i32,
    pub total_departments: i32,
    pub total_positions: i32,
    pub total_users: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn stats(&self) -> OrganizationStats {
        OrganizationStats {
            total_personnel: self.total_personnel,
            total_departments: self.total_departments,
            total_positions: self.total_positions,
            total_users: self.total_users,
        }
    }

    pub fn summary(&self) -> OrganizationSummary {
        OrganizationSummary {
            id: self.id,
            name: self.name.clone(),
            plan: self.plan,
            active: self.active,
        }
    }
}

/// Aggregate counters carried on the organization row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct OrganizationStats {
    pub total_personnel: i32,
    pub total_departments: i32,
    pub total_positions: i32,
    pub total_users: i32,
}

/// The slice of an organization attached to a resolved identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationSummary {
    pub id: Uuid,
    pub name: String,
    pub plan: Plan,
    pub active: bool,
}
