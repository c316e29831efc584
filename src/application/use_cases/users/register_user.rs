//! Register User Use Case

use std::sync::Arc;

use crate::domain::gateways::{PasswordHasher, UserRepository};
use crate::domain::models::user::{normalize_login, validate_password};
use crate::domain::models::{Permission, User};
use crate::shared::errors::UseCaseError;

/// Use case for creating a new account with `user` permission
pub struct RegisterUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserUseCase {
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if the login or password is malformed.
    /// Returns `UseCaseError::Conflict` if the login is taken.
    pub async fn execute(&self, login: &str, password: &str) -> Result<User, UseCaseError> {
        let login = normalize_login(login)?;
        validate_password(password)?;

        tracing::info!(login = %login, "Registering user");

        if self.user_repository.find_by_login(&login).await?.is_some() {
            tracing::warn!(login = %login, "Login already taken");
            return Err(UseCaseError::Conflict(format!("login '{login}' is already taken")));
        }

        let password_hash = self.password_hasher.hash(password).await?;
        let created = self
            .user_repository
            .create(&User::new(login, password_hash, Permission::User))
            .await?;

        tracing::info!(user_id = %created.id(), "User registered");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockPasswordHasher, MockUserRepository};
    use mockall::predicate::eq;

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("$2b$12$hashed".to_string()));
        hasher
    }

    #[tokio::test]
    async fn should_register_user_with_hashed_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().with(eq("listener")).returning(|_| Ok(None));
        repo.expect_create().returning(|user| Ok(user.clone()));

        let use_case = RegisterUserUseCase::new(Arc::new(repo), Arc::new(hasher()));
        let user = use_case.execute("  listener ", "correct horse").await.unwrap();

        assert_eq!(user.login(), "listener");
        assert_eq!(user.password_hash(), "$2b$12$hashed");
        assert_eq!(user.permission(), Permission::User);
    }

    #[tokio::test]
    async fn should_return_conflict_when_login_taken() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(|_| Ok(Some(test_support::user(Permission::User))));
        repo.expect_create().never();

        let use_case = RegisterUserUseCase::new(Arc::new(repo), Arc::new(hasher()));
        let result = use_case.execute("Listener", "correct horse").await;

        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_reject_short_password_before_touching_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().never();

        let use_case = RegisterUserUseCase::new(Arc::new(repo), Arc::new(MockPasswordHasher::new()));
        let result = use_case.execute("listener", "short").await;

        assert!(matches!(result, Err(UseCaseError::Domain(_))));
    }
}
