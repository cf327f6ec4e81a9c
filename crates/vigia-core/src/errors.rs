//! Application error types with HTTP response conversion.
//!
//! Every rejection the authorization pipeline can produce is a variant here,
//! so each failure maps to exactly one status code and one stable JSON body.
//! Authorization failures are terminal for the request: handlers return them
//! with `?` and the router serializes them immediately. The only class a
//! caller may sensibly retry is [`AppError::UpstreamUnavailable`], which
//! signals that the check itself could not be performed.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// The first group of variants is the authorization taxonomy; the trailing
/// variants cover the ordinary HTTP plumbing around it.
#[derive(Debug)]
pub enum AppError {
    /// No `Authorization` header, or a header that is not a bearer credential.
    MissingCredential(String),
    /// Signature check failed or the claims were malformed.
    InvalidCredential(String),
    /// The credential's `exp` timestamp has passed (or equals the current second).
    ExpiredCredential,
    /// The subject does not map to an active user. Deliberately the same
    /// response for "unknown" and "deactivated" so callers cannot probe.
    InactiveOrUnknownUser,
    /// A non-super-admin identity without an owning organization. This is a
    /// configuration problem, never a silent empty scope.
    NoOrganizationAssigned,
    /// The caller's role is not in the operation's required set.
    InsufficientRole {
        current: String,
        required: Vec<String>,
    },
    /// The organization-level flag for the feature is off.
    FeatureDisabled(String),
    /// Feature is enabled for the organization but the user holds no grant.
    InsufficientPermission(String),
    /// Sensitive-action ceiling reached for this identity.
    RateLimited { retry_after_secs: u64 },
    /// The user/organization store could not be reached or timed out.
    UpstreamUnavailable(anyhow::Error),

    BadRequest(anyhow::Error),
    Validation(String),
    NotFound(String),
    Forbidden(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::MissingCredential(msg.into())
    }

    pub fn invalid_credential(msg: impl Into<String>) -> Self {
        Self::InvalidCredential(msg.into())
    }

    pub fn insufficient_role(current: impl Into<String>, required: &[&str]) -> Self {
        Self::InsufficientRole {
            current: current.into(),
            required: required.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn feature_disabled(feature: impl Into<String>) -> Self {
        Self::FeatureDisabled(feature.into())
    }

    pub fn insufficient_permission(feature: impl Into<String>) -> Self {
        Self::InsufficientPermission(feature.into())
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn upstream_unavailable<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::UpstreamUnavailable(err.into())
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::BadRequest(err.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    /// Status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential(_)
            | Self::InvalidCredential(_)
            | Self::ExpiredCredential
            | Self::InactiveOrUnknownUser => StatusCode::UNAUTHORIZED,
            Self::NoOrganizationAssigned
            | Self::InsufficientRole { .. }
            | Self::FeatureDisabled(_)
            | Self::InsufficientPermission(_)
            | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::MissingCredential(msg) | AppError::InvalidCredential(msg) => {
                json!({ "message": msg })
            }
            AppError::ExpiredCredential => json!({ "message": "Credential has expired" }),
            AppError::InactiveOrUnknownUser => {
                json!({ "message": "Invalid credentials" })
            }
            AppError::NoOrganizationAssigned => {
                json!({ "message": "User has no organization assigned" })
            }
            AppError::InsufficientRole { current, required } => json!({
                "error": "Insufficient role for this operation",
                "rol_actual": current,
                "roles_requeridos": required,
            }),
            AppError::FeatureDisabled(feature) => {
                json!({ "message": format!("Feature '{}' is not enabled for this organization", feature) })
            }
            AppError::InsufficientPermission(feature) => {
                json!({ "message": format!("Missing permission for feature '{}'", feature) })
            }
            AppError::RateLimited { .. } => json!({
                "success": false,
                "message": "Too many sensitive actions, try again later",
            }),
            AppError::UpstreamUnavailable(err) => {
                tracing::error!(error = %err, "Upstream store unavailable");
                json!({ "message": "Service temporarily unavailable" })
            }
            AppError::BadRequest(err) => json!({ "message": err.to_string() }),
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Forbidden(msg) => json!({ "message": msg }),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                json!({ "message": "Internal server error" })
            }
        };

        let mut response = (status, Json(body)).into_response();

        if let AppError::RateLimited { retry_after_secs } = self
            && let Ok(value) = header::HeaderValue::from_str(&retry_after_secs.to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }

        response
    }
}

// Store failures are infrastructure failures, not denials: they must surface
// as 500 so callers can distinguish "not allowed" from "could not check".
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::UpstreamUnavailable(err.into())
    }
}
