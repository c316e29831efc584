//! Get User Profile Use Case

use std::sync::Arc;

use crate::domain::gateways::UserRepository;
use crate::domain::models::{User, UserId};
use crate::shared::errors::UseCaseError;

pub struct GetUserProfileUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl GetUserProfileUseCase {
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the user doesn't exist.
    pub async fn execute(&self, id: &UserId) -> Result<User, UseCaseError> {
        tracing::debug!(user_id = %id, "Fetching user profile");
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("User", id))
    }
}
