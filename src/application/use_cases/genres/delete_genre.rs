//! Delete Genre Use Case

use std::sync::Arc;

use crate::domain::gateways::GenreRepository;
use crate::domain::models::GenreId;
use crate::shared::errors::UseCaseError;

/// Deletes a genre together with its track assignments
pub struct DeleteGenreUseCase {
    genre_repository: Arc<dyn GenreRepository>,
}

impl DeleteGenreUseCase {
    #[must_use]
    pub fn new(genre_repository: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the genre doesn't exist.
    pub async fn execute(&self, id: &GenreId) -> Result<(), UseCaseError> {
        if !self.genre_repository.delete(id).await? {
            return Err(UseCaseError::not_found("Genre", id));
        }
        tracing::info!(genre_id = %id, "Genre deleted");
        Ok(())
    }
}
