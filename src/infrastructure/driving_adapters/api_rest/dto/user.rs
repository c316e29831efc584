//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::{Session, User};

/// Login and password, used for both registration and authentication
#[derive(Deserialize, Validate)]
pub struct CredentialsDto {
    #[validate(length(min = 1, max = 64, message = "login must be between 1 and 64 characters"))]
    pub login: String,

    #[validate(length(min = 1, max = 72, message = "password must be between 1 and 72 characters"))]
    pub password: String,
}

impl std::fmt::Debug for CredentialsDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsDto")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// DTO for changing a user's permission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePermissionDto {
    #[validate(length(min = 1, max = 16, message = "permission is required"))]
    pub permission: String,
}

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub login: String,
    pub permission: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            login: user.login().to_string(),
            permission: user.permission().as_str().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponseDto {
    pub id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponseDto {
    pub user: UserResponseDto,
    pub session: SessionResponseDto,
}

impl AuthResponseDto {
    #[must_use]
    pub fn new(user: User, session: &Session, token: String) -> Self {
        Self {
            user: user.into(),
            session: SessionResponseDto {
                id: *session.id().as_uuid(),
                token,
                expires_at: session.expires_at(),
            },
        }
    }
}
