use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use vigia_core::AppError;
use vigia_models::Identity;

use crate::middleware::context::RequestContext;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Login and receive a JWT access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 429, description = "Too many login attempts"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Get the authenticated identity as the server sees it
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Resolved identity", body = Identity),
        (status = 401, description = "Missing, invalid or expired credential", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(ctx))]
pub async fn me(ctx: RequestContext) -> Result<Json<Identity>, AppError> {
    Ok(Json(ctx.identity))
}
