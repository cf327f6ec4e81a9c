mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    create_test_org, create_test_user, generate_unique_email, set_feature_flag, setup_test_app,
    token_for,
};

fn grant_request(token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/api/features/grants")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The audit write runs on a spawned task; give it a moment to land.
async fn wait_for_audit() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grant_upsert_is_audited(pool: PgPool) {
    let org = create_test_org(&pool, "Acme").await;
    let admin = create_test_user(
        &pool,
        &generate_unique_email("admin"),
        "password123",
        "admin",
        Some(org),
        &[],
    )
    .await;
    let user = create_test_user(
        &pool,
        &generate_unique_email("user"),
        "password123",
        "user",
        Some(org),
        &[],
    )
    .await;
    set_feature_flag(&pool, org, "objetivos", true).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(grant_request(
            &token_for(&admin),
            json!({ "user_id": user.id, "feature": "objetivos", "active": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    wait_for_audit().await;

    #[derive(sqlx::FromRow)]
    struct Row {
        action: String,
        user_email: String,
        method: String,
        status: i32,
    }

    let row = sqlx::query_as::<_, Row>(
        "SELECT action, user_email, method, status FROM audit_log WHERE user_id = $1",
    )
    .bind(admin.id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(row.action, "feature_grant_upsert");
    assert_eq!(row.user_email, admin.email);
    assert_eq!(row.method, "PUT");
    assert_eq!(row.status, 200);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_grant_is_audited_with_its_status(pool: PgPool) {
    let org = create_test_org(&pool, "Acme").await;
    let admin = create_test_user(
        &pool,
        &generate_unique_email("admin"),
        "password123",
        "admin",
        Some(org),
        &[],
    )
    .await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(grant_request(
            &token_for(&admin),
            json!({ "user_id": uuid::Uuid::new_v4(), "feature": "nope", "active": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    wait_for_audit().await;

    let status: i32 =
        sqlx::query_scalar("SELECT status FROM audit_log WHERE user_id = $1")
            .bind(admin.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, 400);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_sensitive_reads_are_audited(pool: PgPool) {
    let root = create_test_user(
        &pool,
        &generate_unique_email("root"),
        "password123",
        "super_admin",
        None,
        &[],
    )
    .await;

    let app = setup_test_app(pool.clone()).await;
    for uri in ["/api/organizations", "/api/audit"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header("authorization", format!("Bearer {}", token_for(&root)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    wait_for_audit().await;

    #[derive(sqlx::FromRow)]
    struct Row {
        action: String,
        method: String,
        status: i32,
    }

    let rows = sqlx::query_as::<_, Row>(
        "SELECT action, method, status FROM audit_log WHERE user_id = $1 ORDER BY action",
    )
    .bind(root.id)
    .fetch_all(&pool)
    .await
    .unwrap();

    let actions: Vec<&str> = rows.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(actions, vec!["audit_review", "organizations_list"]);
    for row in &rows {
        assert_eq!(row.method, "GET");
        assert_eq!(row.status, 200);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_reviews_the_trail(pool: PgPool) {
    let org = create_test_org(&pool, "Acme").await;
    let admin = create_test_user(
        &pool,
        &generate_unique_email("admin"),
        "password123",
        "admin",
        Some(org),
        &[],
    )
    .await;
    let user = create_test_user(
        &pool,
        &generate_unique_email("user"),
        "password123",
        "user",
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
    set_feature_flag(&pool, org, "objetivos", true).await;

    let app = setup_test_app(pool.clone()).await;
    app.oneshot(grant_request(
        &token_for(&admin),
        json!({ "user_id": user.id, "feature": "objetivos", "active": true }),
    ))
    .await
    .unwrap();

    wait_for_audit().await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/audit?user_id={}", admin.id))
                .header("authorization", format!("Bearer {}", token_for(&root)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], json!("feature_grant_upsert"));
    assert_eq!(entries[0]["organization_id"], json!(org.to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_org_admin_cannot_review_the_trail(pool: PgPool) {
    let org = create_test_org(&pool, "Acme").await;
    let admin = create_test_user(
        &pool,
        &generate_unique_email("admin"),
        "password123",
        "admin",
        Some(org),
        &[],
    )
    .await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/audit")
                .header("authorization", format!("Bearer {}", token_for(&admin)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
