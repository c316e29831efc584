//! Listening History Queries

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::gateways::HistoryRepository;
use crate::domain::models::history::recent_window_hours;
use crate::domain::models::rules::HISTORY_MAX_ENTRIES;
use crate::domain::models::{HistoryEntry, UserId};
use crate::shared::errors::UseCaseError;

/// Latest listens of a user, newest first
pub struct GetListeningHistoryUseCase {
    history_repository: Arc<dyn HistoryRepository>,
}

impl GetListeningHistoryUseCase {
    #[must_use]
    pub fn new(history_repository: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<HistoryEntry>, UseCaseError> {
        tracing::debug!(user_id = %user_id, "Fetching listening history");
        Ok(self.history_repository.find_by_user(user_id, HISTORY_MAX_ENTRIES).await?)
    }
}

/// Listens of a user within a look-back window
pub struct GetRecentPlaysUseCase {
    history_repository: Arc<dyn HistoryRepository>,
}

impl GetRecentPlaysUseCase {
    #[must_use]
    pub fn new(history_repository: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if `within_hours` is outside 1 to 720.
    pub async fn execute(&self, user_id: &UserId, within_hours: Option<i64>) -> Result<Vec<HistoryEntry>, UseCaseError> {
        let hours = recent_window_hours(within_hours)?;
        let since = Utc::now() - Duration::hours(hours);
        tracing::debug!(user_id = %user_id, hours, "Fetching recent plays");
        Ok(self.history_repository.find_since(user_id, since).await?)
    }
}
