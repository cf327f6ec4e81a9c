use axum::Router;
use sqlx::PgPool;
use uuid::Uuid;

use vigia::router::init_router;
use vigia::state::AppState;
use vigia_auth::create_access_token;
use vigia_config::{CorsConfig, JwtConfig, RateLimitConfig};
use vigia_core::hash_password;
use vigia_limiter::ActionLimiter;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: String,
    pub organization_id: Option<Uuid>,
    pub permissions: Vec<String>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub async fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_config(pool, RateLimitConfig::default()).await
}

pub fn test_state(pool: PgPool, rate_limit_config: RateLimitConfig) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        rate_limit_config,
        limiter: ActionLimiter::in_memory(),
    }
}

pub async fn setup_test_app_with_config(
    pool: PgPool,
    rate_limit_config: RateLimitConfig,
) -> Router {
    init_router(test_state(pool, rate_limit_config))
}

#[allow(dead_code)]
pub async fn create_test_org(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO organizations (name, plan, active, total_personnel, total_users)
         VALUES ($1, 'professional', true, 25, 4)
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a test user. `role` is one of: "user", "admin", "super_admin".
#[allow(dead_code)]
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: &str,
    organization_id: Option<Uuid>,
    permissions: &[&str],
) -> TestUser {
    let hashed = hash_password(password).unwrap();
    let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, name, password, role, permissions, organization_id, active)
         VALUES ($1, 'Test User', $2, $3, $4, $5, true)
         RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .bind(&permissions)
    .bind(organization_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role: role.to_string(),
        organization_id,
        permissions,
    }
}

#[allow(dead_code)]
pub async fn deactivate_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("UPDATE users SET active = false WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn set_feature_flag(pool: &PgPool, organization_id: Uuid, feature: &str, enabled: bool) {
    sqlx::query(
        "INSERT INTO feature_flags (organization_id, feature, enabled)
         VALUES ($1, $2, $3)
         ON CONFLICT (organization_id, feature) DO UPDATE SET enabled = EXCLUDED.enabled",
    )
    .bind(organization_id)
    .bind(feature)
    .bind(enabled)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn set_feature_grant(
    pool: &PgPool,
    organization_id: Uuid,
    user_id: Uuid,
    feature: &str,
    active: bool,
) {
    sqlx::query(
        "INSERT INTO feature_grants (organization_id, user_id, feature, active)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (organization_id, user_id, feature) DO UPDATE SET active = EXCLUDED.active",
    )
    .bind(organization_id)
    .bind(user_id)
    .bind(feature)
    .bind(active)
    .execute(pool)
    .await
    .unwrap();
}

/// Sign an access token for a fixture user with the test secret.
#[allow(dead_code)]
pub fn token_for(user: &TestUser) -> String {
    create_access_token(
        user.id,
        &user.email,
        Some("Test User"),
        user.organization_id,
        &user.role,
        user.permissions.clone(),
        &test_jwt_config(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email(prefix: &str) -> String {
    format!("{}+{}@example.com", prefix, Uuid::new_v4().simple())
}
