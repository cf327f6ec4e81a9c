//! JWT claim structures for the bearer credential.
//!
//! The wire format predates this service and is kept as-is:
//!
//! ```json
//! { "id": "...", "email": "...", "name": "...", "organizacion_id": "...",
//!   "role": "user", "permisos": ["..."], "exp": 1735689600 }
//! ```
//!
//! Historically some issuers wrote the subject under `userId` instead of
//! `id`. [`RawClaims`] accepts either and [`RawClaims::normalize`] collapses
//! them into one internal field. This dual naming is a compatibility shim,
//! not a convention to extend: new tokens are always issued with `id`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use vigia_core::AppError;

/// Claims exactly as they appear on the wire, before normalization.
///
/// Only the verifier constructs this type; everything downstream works with
/// the normalized [`Claims`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawClaims {
    /// Canonical subject field.
    pub id: Option<String>,
    /// Legacy subject field written by older issuers.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub organizacion_id: Option<Uuid>,
    pub role: Option<String>,
    pub permisos: Option<Vec<String>>,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
    /// Issued-at timestamp (Unix seconds).
    pub iat: Option<i64>,
}

impl RawClaims {
    /// Collapses the `id`/`userId` duality into a single subject.
    ///
    /// `id` wins when both are present. A token carrying neither has no
    /// subject and is rejected as malformed.
    pub fn normalize(self) -> Result<Claims, AppError> {
        let sub = self
            .id
            .or(self.user_id)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::invalid_credential("Credential has no subject"))?;

        Ok(Claims {
            sub,
            email: self.email,
            name: self.name,
            organization_id: self.organizacion_id,
            role: self.role,
            permissions: self.permisos.unwrap_or_default(),
            exp: self.exp,
            iat: self.iat,
        })
    }
}

/// Normalized access-token claims.
///
/// Serializes back to the canonical wire shape (`id`, `organizacion_id`,
/// `permisos`), so issued tokens round-trip through [`RawClaims`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject: the user id.
    #[serde(rename = "id")]
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Owning organization (absent for platform super-admins).
    #[serde(rename = "organizacion_id", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "permisos")]
    pub permissions: Vec<String>,
    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
    /// Issued-at timestamp (Unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Subject parsed as a user id.
    pub fn subject_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::invalid_credential("Invalid subject id in credential"))
    }
}
