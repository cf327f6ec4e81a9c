//! Role-based authorization middleware.
//!
//! Routes declare the roles that may call them; administrators of either
//! tier pass every gate regardless of the declared set. The denial body
//! names the caller's role and the required set so clients can explain the
//! rejection.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use tracing::warn;

use vigia_core::AppError;
use vigia_models::{Identity, Role};

use crate::middleware::context::RequestContext;
use crate::state::AppState;

/// Middleware function that checks the resolved identity's role against an
/// allowed set.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected_routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_roles(state, req, next, vec![Role::Admin])
///     ));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let ctx = RequestContext::from_request_parts(&mut parts, &state).await?;
    check_role_policy_for(&ctx.identity, &allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Helper for routes open to both administrator tiers.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![Role::Admin, Role::SuperAdmin],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Helper for platform-level routes (super-admin only).
///
/// Deliberately not built on [`check_role_policy`]: the admin fallback there
/// would admit organization admins, and platform routes are exactly the
/// surface that fallback must not reach.
pub async fn require_super_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let ctx = match RequestContext::from_request_parts(&mut parts, &state).await {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    if !ctx.is_super_admin() {
        let err = AppError::insufficient_role(ctx.identity.role.as_str(), &["super_admin"]);
        warn!(
            user_id = %ctx.identity.id,
            role = %ctx.identity.role,
            reason = ?err,
            "Role policy denied request"
        );
        return err.into_response();
    }

    let req = Request::from_parts(parts, body);
    next.run(req).await
}

/// The role decision itself, independent of HTTP.
///
/// Administrators always pass: the admin tiers outrank any declared set, so
/// listing them per route is unnecessary. Everyone else must appear in the
/// set verbatim.
pub fn check_role_policy(role: &Role, allowed_roles: &[Role]) -> Result<(), AppError> {
    if role.is_admin() {
        return Ok(());
    }

    if allowed_roles.contains(role) {
        return Ok(());
    }

    let required: Vec<&str> = allowed_roles.iter().map(|r| r.as_str()).collect();
    Err(AppError::insufficient_role(role.as_str(), &required))
}

/// [`check_role_policy`] for a concrete identity, logging the denial with
/// who asked and why.
pub fn check_role_policy_for(identity: &Identity, allowed_roles: &[Role]) -> Result<(), AppError> {
    let result = check_role_policy(&identity.role, allowed_roles);
    if let Err(err) = &result {
        warn!(
            user_id = %identity.id,
            role = %identity.role,
            reason = ?err,
            "Role policy denied request"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::logging::test_support::LogBuffer;

    fn identity(role: Role) -> Identity {
        Identity {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: "Test".to_string(),
            role,
            organization_id: None,
            permissions: vec![],
            organization: None,
        }
    }

    #[test]
    fn test_listed_role_passes() {
        assert!(check_role_policy(&Role::User, &[Role::User]).is_ok());
    }

    #[test]
    fn test_unlisted_role_is_denied() {
        let err = check_role_policy(&Role::User, &[Role::Custom("auditor".into())]).unwrap_err();
        match err {
            AppError::InsufficientRole { current, required } => {
                assert_eq!(current, "user");
                assert_eq!(required, vec!["auditor"]);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_admins_pass_any_gate() {
        // Even an empty allowed set admits administrators.
        assert!(check_role_policy(&Role::Admin, &[]).is_ok());
        assert!(check_role_policy(&Role::SuperAdmin, &[]).is_ok());
        assert!(check_role_policy(&Role::Admin, &[Role::Custom("auditor".into())]).is_ok());
    }

    #[test]
    fn test_custom_role_matches_verbatim() {
        let auditor = Role::Custom("auditor".to_string());
        assert!(check_role_policy(&auditor, &[auditor.clone()]).is_ok());
        assert!(check_role_policy(&auditor, &[Role::User]).is_err());
    }

    #[test]
    fn test_role_denial_is_logged_with_identity() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let caller = identity(Role::User);
        let err =
            check_role_policy_for(&caller, &[Role::Custom("auditor".into())]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientRole { .. }));

        let logs = buffer.contents();
        assert!(logs.contains("Role policy denied request"));
        assert!(logs.contains(&caller.id.to_string()));
        assert!(logs.contains("InsufficientRole"));
    }

    #[test]
    fn test_role_pass_is_not_logged_as_denial() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let caller = identity(Role::Admin);
        assert!(check_role_policy_for(&caller, &[]).is_ok());
        assert!(!buffer.contents().contains("Role policy denied request"));
    }
}
