//! User Repository Gateway
//!
//! Persistence contract for accounts and their login sessions.

use async_trait::async_trait;

use crate::domain::models::{Session, SessionId, User, UserId};
use crate::shared::errors::RepositoryError;

/// Repository trait for User persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Find a user by login, compared case-insensitively
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepositoryError>;

    /// Create a new user
    async fn create(&self, user: &User) -> Result<User, RepositoryError>;

    /// Persist the permission and `updated_at` of an existing user
    async fn update(&self, user: &User) -> Result<Option<User>, RepositoryError>;

    /// Delete a user, returning whether a row was removed
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;
}

/// Repository trait for login sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError>;

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;

    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError>;

    /// Delete every session of a user, returning how many were removed
    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
}
