//! Logout Use Case

use std::sync::Arc;

use crate::domain::gateways::SessionRepository;
use crate::domain::models::SessionId;
use crate::shared::errors::UseCaseError;

/// Ends a session. Unknown sessions are ignored.
pub struct LogoutUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl LogoutUseCase {
    #[must_use]
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, session_id: &SessionId) -> Result<(), UseCaseError> {
        let removed = self.session_repository.delete(session_id).await?;
        tracing::info!(session_id = %session_id, removed, "Session closed");
        Ok(())
    }
}
