//! Security audit middleware.
//!
//! Records who did what on the routes it wraps. The write is fire-and-forget:
//! it runs on a spawned task after the response is produced, and a failed
//! insert is logged and swallowed. Auditing must never change the outcome of
//! the request it describes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use vigia_core::AppError;

use crate::middleware::context::RequestContext;
use crate::modules::audit::model::AuditEntry;
use crate::modules::audit::service::AuditService;
use crate::state::AppState;

pub async fn audit_action(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    action: &'static str,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let ctx = RequestContext::from_request_parts(&mut parts, &state).await?;
    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();
    let params = parts
        .uri
        .query()
        .map(|q| serde_json::json!({ "query": q }));

    let req = Request::from_parts(parts, body);
    let response = next.run(req).await;

    let entry = AuditEntry {
        action: action.to_string(),
        user_id: ctx.identity.id,
        user_email: ctx.identity.email.clone(),
        organization_id: ctx.identity.organization_id,
        method,
        path,
        params,
        status: response.status().as_u16() as i32,
    };

    let db = state.db.clone();
    tokio::spawn(async move {
        if let Err(err) = AuditService::record(&db, entry).await {
            warn!(error = ?err, "Failed to record audit entry");
        }
    });

    Ok(response)
}
