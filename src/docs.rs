use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use vigia_auth::Claims;
use vigia_models::{Identity, Organization, OrganizationStats, OrganizationSummary, Plan, Role};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::audit::model::AuditRecord;
use crate::modules::features::model::{FeatureFlag, FeatureGrant, SetGrantRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::organizations::controller::get_organization,
        crate::modules::organizations::controller::get_organization_stats,
        crate::modules::organizations::controller::list_organizations,
        crate::modules::features::controller::check_feature_access,
        crate::modules::features::controller::list_feature_flags,
        crate::modules::features::controller::set_feature_grant,
        crate::modules::audit::controller::list_audit_log,
    ),
    components(
        schemas(
            Claims,
            Identity,
            Role,
            Organization,
            OrganizationSummary,
            OrganizationStats,
            Plan,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            FeatureFlag,
            FeatureGrant,
            SetGrantRequest,
            AuditRecord,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and session endpoints"),
        (name = "Organizations", description = "Tenant organizations and their stats"),
        (name = "Features", description = "Feature flags and per-user grants"),
        (name = "Audit", description = "Security audit trail")
    ),
    info(
        title = "Vigia API",
        version = "0.1.0",
        description = "Authentication and tenant-authorization service built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
