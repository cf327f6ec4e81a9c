//! Access-token signing and verification.
//!
//! Verification is a pure function of the token, the secret and the clock:
//! no storage lookups happen here. The caller resolves the subject against
//! the user store afterwards.
//!
//! Expiry is checked manually instead of through the library validator: the
//! library treats `exp == now` as still valid and applies a default leeway,
//! while this service rejects a token the instant its `exp` is reached.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use vigia_config::JwtConfig;
use vigia_core::AppError;

use crate::claims::{Claims, RawClaims};

/// Signs a fresh access token for the given user.
///
/// Always writes the subject under the canonical `id` claim. The legacy
/// `userId` spelling is accepted on verification only.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    name: Option<&str>,
    organization_id: Option<Uuid>,
    role: &str,
    permissions: Vec<String>,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        email: Some(email.to_string()),
        name: name.map(String::from),
        organization_id,
        role: Some(role.to_string()),
        permissions,
        exp: now + config.access_token_expiry,
        iat: Some(now),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to sign access token: {e}")))
}

/// Verifies a bearer token and returns its normalized claims.
///
/// Distinguishes two rejection classes:
///
/// - [`AppError::InvalidCredential`] for signature, structure or subject
///   problems;
/// - [`AppError::ExpiredCredential`] for a structurally valid token whose
///   `exp` has been reached (`exp <= now`, no leeway).
///
/// Verifying the same unexpired token twice yields identical claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    // exp is checked below so that a token dying exactly now is already
    // rejected; the library validator would accept it and add leeway.
    validation.validate_exp = false;

    let token_data = decode::<RawClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AppError::invalid_credential(format!("Invalid credential: {e}")))?;

    let claims = token_data.claims.normalize()?;

    if claims.exp <= Utc::now().timestamp() {
        return Err(AppError::ExpiredCredential);
    }

    Ok(claims)
}
