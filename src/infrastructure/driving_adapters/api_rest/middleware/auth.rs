//! JWT Authentication
//!
//! Issues session tokens and extracts the caller identity from requests.
//! A token only proves which session it belongs to; the session and the
//! caller's permission are always re-read from the store.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::models::{CurrentUser, Session, SessionId, User};
use crate::infrastructure::driven_adapters::config::JwtConfig;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Session ID
    pub sid: String,
    /// Permission at the time of issue, informational only
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp, equal to the session expiry
    pub exp: i64,
}

/// Sign a token for a freshly opened session
///
/// # Errors
///
/// Returns `ApiError::Internal` if the token cannot be encoded.
pub fn issue_token(jwt: &JwtConfig, user: &User, session: &Session) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user.id().to_string(),
        sid: session.id().to_string(),
        role: user.permission().as_str().to_string(),
        iat: session.created_at().timestamp(),
        exp: session.expires_at().timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

/// Verify signature and expiry of a token
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for any invalid token.
pub fn decode_token(jwt: &JwtConfig, token: &str) -> Result<Claims, ApiError> {
    // Pin the algorithm to prevent algorithm confusion attacks
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(jwt.secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected token");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })
}

/// Bearer token of the request, if an Authorization header is present
fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| Some(t.trim()))
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

/// Resolve a token to the user behind its session
async fn current_user(state: &AppState, token: &str) -> Result<CurrentUser, ApiError> {
    let claims = decode_token(&state.config.jwt, token)?;
    let session_id = SessionId::try_from(claims.sid.as_str())
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let user = state.users.validate_session.execute(&session_id).await?;
    if user.user_id.to_string() != claims.sub {
        tracing::warn!(session_id = %session_id, "Token subject does not match session owner");
        return Err(ApiError::Unauthorized("Invalid or expired token".to_string()));
    }
    Ok(user)
}

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;
        current_user(state, token).await.map(Self)
    }
}

/// An authenticated user holding the admin permission
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.user_id, "Non-admin attempted an admin operation");
            return Err(ApiError::Forbidden("Admin permission required".to_string()));
        }
        Ok(Self(user))
    }
}

/// The caller when a valid token is supplied; anonymous otherwise
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<CurrentUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(Some(token)) = bearer_token(parts) else {
            return Ok(Self(None));
        };
        match current_user(state, token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(ApiError::UseCase(e)) if e.is_internal() => Err(ApiError::UseCase(e)),
            Err(_) => Ok(Self(None)),
        }
    }
}
