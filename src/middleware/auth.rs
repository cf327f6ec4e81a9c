use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use vigia_auth::{Claims, verify_token};
use vigia_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and provides its claims.
///
/// This is the credential step only: the claims are verified but not yet
/// resolved against the user store. Handlers that need the authoritative
/// identity use [`crate::middleware::context::RequestContext`] instead.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the subject as a user id.
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        self.0.subject_id()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::missing_credential("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::missing_credential("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
