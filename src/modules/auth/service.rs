use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use vigia_auth::create_access_token;
use vigia_config::JwtConfig;
use vigia_core::{AppError, verify_password};

use crate::config::database;
use crate::modules::users::service::UsersService;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Authenticates by email and password and issues an access token.
    ///
    /// Inactive accounts cannot log in, and the response for a wrong
    /// password, an unknown email and a deactivated account is identical.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            password: String,
        }

        let query = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, password FROM users WHERE email = $1 AND active = true",
        )
        .bind(&dto.email)
        .fetch_optional(db);

        let user_with_password = database::bounded("Credential lookup", query)
            .await?
            .ok_or(AppError::InactiveOrUnknownUser)?;

        let is_valid = verify_password(&dto.password, &user_with_password.password)?;
        if !is_valid {
            return Err(AppError::InactiveOrUnknownUser);
        }

        let user = UsersService::resolve_identity(db, user_with_password.id).await?;

        let access_token = create_access_token(
            user.id,
            &user.email,
            Some(user.name.as_str()),
            user.organization_id,
            user.role.as_str(),
            user.permissions.clone(),
            jwt_config,
        )?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse { access_token, user })
    }
}
