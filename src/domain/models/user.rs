//! User Domain Model
//!
//! Registered accounts, their permission level and login sessions.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use super::ids::{SessionId, UserId};
use super::rules::{check_length, LOGIN_MAX_CHARS, LOGIN_MIN_CHARS, PASSWORD_MAX_BYTES, PASSWORD_MIN_CHARS};
use crate::shared::errors::DomainError;

/// Access level of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    User,
    Admin,
    Moderator,
}

impl Permission {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
        }
    }

    /// Whether the permission may be granted through a permission update.
    /// `moderator` exists in stored data but is not assignable.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::User | Self::Admin)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            other => Err(DomainError::Validation(format!("unknown permission '{other}'"))),
        }
    }
}

/// Validate and normalize a login name
pub fn normalize_login(login: &str) -> Result<String, DomainError> {
    let login = login.trim();
    check_length("login", login, LOGIN_MIN_CHARS, LOGIN_MAX_CHARS)?;
    Ok(login.to_string())
}

/// Validate a plain-text password before hashing
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(DomainError::Validation(format!(
            "password must be at least {PASSWORD_MIN_CHARS} characters"
        )));
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err(DomainError::Validation(format!(
            "password is too long (max {PASSWORD_MAX_BYTES} bytes)"
        )));
    }
    Ok(())
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    login: String,
    password_hash: String,
    permission: Permission,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user. `login` must already be normalized.
    #[must_use]
    pub fn new(login: String, password_hash: String, permission: Permission) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            login,
            password_hash,
            permission,
            created_at: now,
            updated_at: now,
        }
    }

    /// Restore a User from persisted data
    #[must_use]
    pub fn restore(
        id: UserId,
        login: String,
        password_hash: String,
        permission: Permission,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            login,
            password_hash,
            permission,
            created_at,
            updated_at,
        }
    }

    /// Return the user with a different permission
    #[must_use]
    pub fn with_permission(self, permission: Permission) -> Self {
        Self {
            permission,
            updated_at: Utc::now(),
            ..self
        }
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub fn permission(&self) -> Permission {
        self.permission
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Server-side login session
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `user_id` that lives for `ttl`
    #[must_use]
    pub fn open(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    #[must_use]
    pub fn restore(id: SessionId, user_id: UserId, expires_at: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            expires_at,
            created_at,
        }
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Identity of the caller, resolved from a valid session
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub login: String,
    pub permission: Permission,
    pub session_id: SessionId,
}

impl CurrentUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.permission.is_admin()
    }
}
