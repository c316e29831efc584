//! Authenticate User Use Case
//!
//! Verifies credentials and opens a server-side session.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::gateways::{PasswordHasher, SessionRepository, UserRepository};
use crate::domain::models::{Session, User};
use crate::shared::errors::UseCaseError;

const INVALID_CREDENTIALS: &str = "invalid credentials";

pub struct AuthenticateUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    session_ttl: Duration,
}

impl AuthenticateUserUseCase {
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn SessionRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            password_hasher,
            session_ttl,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Unauthorized` for an unknown login or a wrong password.
    pub async fn execute(&self, login: &str, password: &str) -> Result<(User, Session), UseCaseError> {
        let login = login.trim();

        let Some(user) = self.user_repository.find_by_login(login).await? else {
            tracing::warn!(login = %login, "Login attempt for unknown user");
            return Err(UseCaseError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self.password_hasher.verify(password, user.password_hash()).await? {
            tracing::warn!(user_id = %user.id(), "Login attempt with wrong password");
            return Err(UseCaseError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let session = self
            .session_repository
            .create(&Session::open(*user.id(), self.session_ttl))
            .await?;

        tracing::info!(user_id = %user.id(), session_id = %session.id(), "User authenticated");
        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockPasswordHasher, MockSessionRepository, MockUserRepository};
    use crate::domain::models::Permission;

    fn use_case(
        users: MockUserRepository,
        sessions: MockSessionRepository,
        hasher: MockPasswordHasher,
    ) -> AuthenticateUserUseCase {
        AuthenticateUserUseCase::new(Arc::new(users), Arc::new(sessions), Arc::new(hasher), Duration::hours(24))
    }

    #[tokio::test]
    async fn should_open_session_for_valid_credentials() {
        let user = test_support::user(Permission::User);
        let user_id = *user.id();
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().return_once(move |_| Ok(Some(user)));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(true));
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().returning(|s| Ok(s.clone()));

        let (user, session) = use_case(users, sessions, hasher)
            .execute("listener", "correct horse")
            .await
            .unwrap();

        assert_eq!(user.id(), &user_id);
        assert_eq!(session.user_id(), &user_id);
        let ttl = session.expires_at() - session.created_at();
        assert_eq!(ttl, Duration::hours(24));
    }

    #[tokio::test]
    async fn should_use_same_message_for_unknown_login_and_wrong_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().returning(|_| Ok(None));
        let unknown = use_case(users, MockSessionRepository::new(), MockPasswordHasher::new())
            .execute("nobody-here", "whatever1")
            .await
            .unwrap_err();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_login()
            .returning(|_| Ok(Some(test_support::user(Permission::User))));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(false));
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().never();
        let wrong = use_case(users, sessions, hasher)
            .execute("listener", "wrong-password")
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(wrong, UseCaseError::Unauthorized(_)));
    }
}
