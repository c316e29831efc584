//! List Genres Use Case

use std::sync::Arc;

use crate::domain::gateways::GenreRepository;
use crate::domain::models::Genre;
use crate::shared::errors::UseCaseError;

pub struct ListGenresUseCase {
    genre_repository: Arc<dyn GenreRepository>,
}

impl ListGenresUseCase {
    #[must_use]
    pub fn new(genre_repository: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self) -> Result<Vec<Genre>, UseCaseError> {
        Ok(self.genre_repository.find_all().await?)
    }
}
