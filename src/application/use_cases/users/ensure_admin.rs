//! Ensure Admin Use Case
//!
//! Startup bootstrap for the configured administrator account.

use std::sync::Arc;

use crate::domain::gateways::{PasswordHasher, UserRepository};
use crate::domain::models::user::{normalize_login, validate_password};
use crate::domain::models::{Permission, User};
use crate::shared::errors::UseCaseError;

pub struct EnsureAdminUseCase {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl EnsureAdminUseCase {
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Create the admin account, or promote an existing account with that login.
    /// An existing password is never replaced.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if the configured credentials are malformed.
    pub async fn execute(&self, login: &str, password: &str) -> Result<User, UseCaseError> {
        let login = normalize_login(login)?;
        validate_password(password)?;

        match self.user_repository.find_by_login(&login).await? {
            Some(existing) if existing.permission().is_admin() => {
                tracing::debug!(user_id = %existing.id(), "Admin account already present");
                Ok(existing)
            }
            Some(existing) => {
                let id = *existing.id();
                tracing::info!(user_id = %id, "Promoting configured account to admin");
                self.user_repository
                    .update(&existing.with_permission(Permission::Admin))
                    .await?
                    .ok_or_else(|| UseCaseError::not_found("User", id))
            }
            None => {
                let password_hash = self.password_hasher.hash(password).await?;
                let created = self
                    .user_repository
                    .create(&User::new(login, password_hash, Permission::Admin))
                    .await?;
                tracing::info!(user_id = %created.id(), "Admin account created");
                Ok(created)
            }
        }
    }
}
