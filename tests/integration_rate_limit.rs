mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    create_test_user, generate_unique_email, setup_test_app_with_config, token_for,
};
use vigia_config::RateLimitConfig;

/// Strict transport config: a single login attempt per IP.
fn strict_transport_config() -> RateLimitConfig {
    RateLimitConfig {
        auth_per_second: 60,
        auth_burst_size: 1,
        ..RateLimitConfig::default()
    }
}

/// Strict sensitive-action config: two privileged actions per window.
fn strict_sensitive_config() -> RateLimitConfig {
    RateLimitConfig {
        sensitive_max_actions: 2,
        sensitive_window_secs: 60,
        ..RateLimitConfig::default()
    }
}

fn login_request(ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "test@example.com",
                "password": "password123"
            }))
            .unwrap(),
        ))
        .unwrap()
}

fn audit_request(token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/audit")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rate_limit_per_ip(pool: PgPool) {
    let app = setup_test_app_with_config(pool, strict_transport_config()).await;

    let response = app.clone().oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app.oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rate_limit_is_per_client(pool: PgPool) {
    let app = setup_test_app_with_config(pool, strict_transport_config()).await;

    let response = app.clone().oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different address has its own bucket.
    let response = app.oneshot(login_request("192.168.1.101")).await.unwrap();
    assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sensitive_action_ceiling_per_identity(pool: PgPool) {
    let root = create_test_user(
        &pool,
        &generate_unique_email("root"),
        "password123",
        "super_admin",
        None,
        &[],
    )
    .await;
    let token = token_for(&root);

    let app = setup_test_app_with_config(pool, strict_sensitive_config()).await;

    for _ in 0..2 {
        let response = app.clone().oneshot(audit_request(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(audit_request(&token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: u64 = response
        .headers()
        .get("retry-after")
        .expect("Retry-After header missing")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after >= 1 && retry_after <= 60);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("Too many"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sensitive_ceilings_are_independent_per_identity(pool: PgPool) {
    let root_a = create_test_user(
        &pool,
        &generate_unique_email("root-a"),
        "password123",
        "super_admin",
        None,
        &[],
    )
    .await;
    let root_b = create_test_user(
        &pool,
        &generate_unique_email("root-b"),
        "password123",
        "super_admin",
        None,
        &[],
    )
    .await;

    let app = setup_test_app_with_config(pool, strict_sensitive_config()).await;

    let token_a = token_for(&root_a);
    for _ in 0..2 {
        let response = app.clone().oneshot(audit_request(&token_a)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app.clone().oneshot(audit_request(&token_a)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // The second super-admin still has a full window.
    let response = app.oneshot(audit_request(&token_for(&root_b))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_denied_role_consumes_no_sensitive_quota(pool: PgPool) {
    let org = common::create_test_org(&pool, "Acme").await;
    let admin = create_test_user(
        &pool,
        &generate_unique_email("admin"),
        "password123",
        "admin",
        Some(org),
        &[],
    )
    .await;
    let root = create_test_user(
        &pool,
        &generate_unique_email("root"),
        "password123",
        "super_admin",
        None,
        &[],
    )
    .await;

    let config = RateLimitConfig {
        sensitive_max_actions: 1,
        ..strict_sensitive_config()
    };
    let app = setup_test_app_with_config(pool, config).await;

    // Role gate sits outside the limiter, so these denials do not count.
    let token_admin = token_for(&admin);
    for _ in 0..3 {
        let response = app.clone().oneshot(audit_request(&token_admin)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let response = app.oneshot(audit_request(&token_for(&root))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
