use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::audit::audit_action;
use crate::middleware::rate_limit::limit_sensitive_actions;
use crate::middleware::role::{require_admin, require_super_admin};
use crate::modules::audit::router::init_audit_router;
use crate::modules::auth::router::{init_auth_router, init_session_router};
use crate::modules::features::router::{init_feature_grants_router, init_features_router};
use crate::modules::organizations::router::{
    init_organizations_admin_router, init_organizations_router,
};
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn init_router(state: AppState) -> Router {
    let auth_governor = Arc::new(state.rate_limit_config.auth_governor_config());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router()
                        .layer(GovernorLayer::new(auth_governor))
                        .merge(init_session_router()),
                )
                .nest(
                    "/organizations",
                    init_organizations_router().merge(
                        // Outermost first: role gate, then the audit trail,
                        // then the per-identity ceiling. Callers denied by
                        // role consume no quota and leave no audit row; a
                        // ceiling denial is recorded with its 429.
                        init_organizations_admin_router()
                            .route_layer(middleware::from_fn_with_state(
                                state.clone(),
                                limit_sensitive_actions,
                            ))
                            .route_layer(middleware::from_fn_with_state(
                                state.clone(),
                                |state, req, next| {
                                    audit_action(state, req, next, "organizations_list")
                                },
                            ))
                            .route_layer(middleware::from_fn_with_state(
                                state.clone(),
                                require_super_admin,
                            )),
                    ),
                )
                .nest(
                    "/features",
                    init_features_router().merge(
                        init_feature_grants_router()
                            .route_layer(middleware::from_fn_with_state(
                                state.clone(),
                                |state, req, next| {
                                    audit_action(state, req, next, "feature_grant_upsert")
                                },
                            ))
                            .route_layer(middleware::from_fn_with_state(
                                state.clone(),
                                require_admin,
                            )),
                    ),
                )
                .nest(
                    "/audit",
                    init_audit_router()
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            limit_sensitive_actions,
                        ))
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            |state, req, next| audit_action(state, req, next, "audit_review"),
                        ))
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            require_super_admin,
                        )),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
