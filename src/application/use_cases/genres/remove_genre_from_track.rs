//! Remove Genre From Track Use Case

use std::sync::Arc;

use crate::domain::gateways::GenreRepository;
use crate::domain::models::{GenreId, TrackId};
use crate::shared::errors::UseCaseError;

pub struct RemoveGenreFromTrackUseCase {
    genre_repository: Arc<dyn GenreRepository>,
}

impl RemoveGenreFromTrackUseCase {
    #[must_use]
    pub fn new(genre_repository: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the genre is not assigned to the track.
    pub async fn execute(&self, track_id: &TrackId, genre_id: &GenreId) -> Result<(), UseCaseError> {
        if !self.genre_repository.unassign(track_id, genre_id).await? {
            return Err(UseCaseError::not_found("Genre assignment", format!("{track_id}/{genre_id}")));
        }
        tracing::info!(track_id = %track_id, genre_id = %genre_id, "Genre removed from track");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockGenreRepository;

    #[tokio::test]
    async fn should_return_not_found_when_not_assigned() {
        let mut repo = MockGenreRepository::new();
        repo.expect_unassign().returning(|_, _| Ok(false));

        let result = RemoveGenreFromTrackUseCase::new(Arc::new(repo))
            .execute(&TrackId::new(), &GenreId::new())
            .await;
        assert!(matches!(result, Err(UseCaseError::NotFound { .. })));
    }
}
