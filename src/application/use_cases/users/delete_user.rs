//! Delete User Use Case

use std::sync::Arc;

use crate::domain::gateways::{SessionRepository, UserRepository};
use crate::domain::models::UserId;
use crate::shared::errors::UseCaseError;

/// Removes an account with its sessions; playlists and history cascade.
pub struct DeleteUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
}

impl DeleteUserUseCase {
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, session_repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            user_repository,
            session_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the user doesn't exist.
    pub async fn execute(&self, id: &UserId) -> Result<(), UseCaseError> {
        if self.user_repository.find_by_id(id).await?.is_none() {
            return Err(UseCaseError::not_found("User", id));
        }

        let sessions = self.session_repository.delete_by_user(id).await?;
        if !self.user_repository.delete(id).await? {
            return Err(UseCaseError::not_found("User", id));
        }

        tracing::info!(user_id = %id, sessions, "User deleted");
        Ok(())
    }
}
