//! Validate Session Use Case
//!
//! Resolves a session id to the caller's identity with the permission
//! currently stored for the user.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::gateways::{SessionRepository, UserRepository};
use crate::domain::models::{CurrentUser, SessionId};
use crate::shared::errors::UseCaseError;

pub struct ValidateSessionUseCase {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
}

impl ValidateSessionUseCase {
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, session_repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            user_repository,
            session_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Unauthorized` if the session is unknown or expired,
    /// or its user no longer exists.
    pub async fn execute(&self, session_id: &SessionId) -> Result<CurrentUser, UseCaseError> {
        let Some(session) = self.session_repository.find_by_id(session_id).await? else {
            tracing::debug!(session_id = %session_id, "Unknown session");
            return Err(UseCaseError::Unauthorized("session is not valid".to_string()));
        };

        if session.is_expired_at(Utc::now()) {
            tracing::debug!(session_id = %session_id, "Session expired");
            if let Err(e) = self.session_repository.delete(session_id).await {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to purge expired session");
            }
            return Err(UseCaseError::Unauthorized("session has expired".to_string()));
        }

        let user = self
            .user_repository
            .find_by_id(session.user_id())
            .await?
            .ok_or_else(|| UseCaseError::Unauthorized("session is not valid".to_string()))?;

        Ok(CurrentUser {
            user_id: *user.id(),
            login: user.login().to_string(),
            permission: user.permission(),
            session_id: *session.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockSessionRepository, MockUserRepository};
    use crate::domain::models::Permission;
    use chrono::Duration;

    #[tokio::test]
    async fn should_return_current_permission_from_store() {
        let user = test_support::user(Permission::Admin);
        let session = test_support::session_for(*user.id(), Duration::hours(1));
        let session_id = *session.id();

        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_id().return_once(move |_| Ok(Some(session)));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(move |_| Ok(Some(user)));

        let current = ValidateSessionUseCase::new(Arc::new(users), Arc::new(sessions))
            .execute(&session_id)
            .await
            .unwrap();

        assert!(current.is_admin());
        assert_eq!(current.session_id, session_id);
    }

    #[tokio::test]
    async fn should_reject_and_purge_expired_session() {
        let session = test_support::session_for(crate::domain::models::UserId::new(), Duration::hours(-1));
        let session_id = *session.id();

        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_id().return_once(move |_| Ok(Some(session)));
        sessions.expect_delete().times(1).returning(|_| Ok(true));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();

        let result = ValidateSessionUseCase::new(Arc::new(users), Arc::new(sessions))
            .execute(&session_id)
            .await;

        assert!(matches!(result, Err(UseCaseError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn should_reject_unknown_session() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_id().returning(|_| Ok(None));

        let result = ValidateSessionUseCase::new(Arc::new(MockUserRepository::new()), Arc::new(sessions))
            .execute(&SessionId::new())
            .await;

        assert!(matches!(result, Err(UseCaseError::Unauthorized(_))));
    }
}
