//! Update Permission Use Case

use std::sync::Arc;

use crate::domain::gateways::UserRepository;
use crate::domain::models::{Permission, User, UserId};
use crate::shared::errors::UseCaseError;

/// Changes the permission of an account. Callers must be admins.
pub struct UpdatePermissionUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl UpdatePermissionUseCase {
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the permission cannot be assigned.
    /// Returns `UseCaseError::NotFound` if the user doesn't exist.
    pub async fn execute(&self, id: &UserId, permission: Permission) -> Result<User, UseCaseError> {
        if !permission.is_assignable() {
            return Err(UseCaseError::validation(format!(
                "permission: '{permission}' cannot be assigned"
            )));
        }

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("User", id))?;

        tracing::info!(user_id = %id, from = %user.permission(), to = %permission, "Updating permission");

        self.user_repository
            .update(&user.with_permission(permission))
            .await?
            .ok_or_else(|| UseCaseError::not_found("User", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::MockUserRepository;

    #[tokio::test]
    async fn should_promote_user_to_admin() {
        let user = test_support::user(Permission::User);
        let id = *user.id();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(user)));
        repo.expect_update().returning(|u| Ok(Some(u.clone())));

        let updated = UpdatePermissionUseCase::new(Arc::new(repo))
            .execute(&id, Permission::Admin)
            .await
            .unwrap();

        assert_eq!(updated.permission(), Permission::Admin);
    }

    #[tokio::test]
    async fn should_reject_moderator() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let result = UpdatePermissionUseCase::new(Arc::new(repo))
            .execute(&UserId::new(), Permission::Moderator)
            .await;

        assert!(matches!(result, Err(UseCaseError::Validation(_))));
    }
}
