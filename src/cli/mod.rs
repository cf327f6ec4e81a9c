//! CLI commands that bypass the HTTP surface.
//!
//! Super-admins cannot be created through the API by design; this module
//! backs the `create-superadmin` subcommand.

use sqlx::PgPool;
use uuid::Uuid;

use vigia_core::{AppError, hash_password};

/// Creates a platform super-admin. Fails if the email is already taken.
pub async fn create_super_admin(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, AppError> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "A user with that email already exists"
        )));
    }

    let hashed = hash_password(password)?;

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password, role, active)
         VALUES ($1, $2, $3, 'super_admin', true)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
