//! Per-request authorization context.
//!
//! One verified credential plus one store lookup yields a [`RequestContext`]
//! holding the authoritative identity and its tenant scope. The context is
//! cached in the request extensions, so a request that passes through
//! several gates (role middleware, feature middleware, handler) resolves the
//! user exactly once.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use vigia_core::AppError;
use vigia_models::{Identity, TenantScope};

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UsersService;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub identity: Identity,
    pub scope: TenantScope,
}

impl RequestContext {
    pub fn is_admin(&self) -> bool {
        self.identity.is_admin()
    }

    pub fn is_super_admin(&self) -> bool {
        self.identity.is_super_admin()
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(ctx.clone());
        }

        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let user_id = auth_user.user_id()?;

        let identity = UsersService::resolve_identity(&state.db, user_id).await?;
        let scope = TenantScope::for_identity(&identity)?;

        let ctx = RequestContext { identity, scope };
        parts.extensions.insert(ctx.clone());

        Ok(ctx)
    }
}
