//! Search Tracks Use Case

use std::sync::Arc;

use crate::domain::gateways::TrackRepository;
use crate::domain::models::rules::{SEARCH_MAX_RESULTS, SEARCH_QUERY_MIN_CHARS};
use crate::domain::models::Track;
use crate::shared::errors::UseCaseError;

/// Case-insensitive search over track titles and artist names
pub struct SearchTracksUseCase {
    track_repository: Arc<dyn TrackRepository>,
}

impl SearchTracksUseCase {
    #[must_use]
    pub fn new(track_repository: Arc<dyn TrackRepository>) -> Self {
        Self { track_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the trimmed query is shorter than 3 characters.
    pub async fn execute(&self, query: &str) -> Result<Vec<Track>, UseCaseError> {
        let query = query.trim();
        if query.chars().count() < SEARCH_QUERY_MIN_CHARS {
            return Err(UseCaseError::validation(format!(
                "q: search query must be at least {SEARCH_QUERY_MIN_CHARS} characters"
            )));
        }

        tracing::debug!(query = %query, "Searching tracks");
        let tracks = self.track_repository.search(query, SEARCH_MAX_RESULTS).await?;
        tracing::debug!(count = tracks.len(), "Search finished");
        Ok(tracks)
    }
}
