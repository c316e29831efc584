//! Create Genre Use Case

use std::sync::Arc;

use crate::domain::gateways::GenreRepository;
use crate::domain::models::Genre;
use crate::shared::errors::UseCaseError;

pub struct CreateGenreUseCase {
    genre_repository: Arc<dyn GenreRepository>,
}

impl CreateGenreUseCase {
    #[must_use]
    pub fn new(genre_repository: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if the name is out of range.
    /// Returns `UseCaseError::Conflict` if the name is taken (case-insensitive).
    pub async fn execute(&self, name: &str) -> Result<Genre, UseCaseError> {
        let genre = Genre::new(name)?;

        if self.genre_repository.exists_by_name(genre.name()).await? {
            tracing::warn!(name = %genre.name(), "Genre already exists");
            return Err(UseCaseError::Conflict(format!("genre '{}' already exists", genre.name())));
        }

        let created = self.genre_repository.create(&genre).await?;
        tracing::info!(genre_id = %created.id(), name = %created.name(), "Genre created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockGenreRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn should_create_trimmed_genre() {
        let mut repo = MockGenreRepository::new();
        repo.expect_exists_by_name().with(eq("Bebop")).returning(|_| Ok(false));
        repo.expect_create().returning(|g| Ok(g.clone()));

        let genre = CreateGenreUseCase::new(Arc::new(repo)).execute(" Bebop ").await.unwrap();
        assert_eq!(genre.name(), "Bebop");
    }

    #[tokio::test]
    async fn should_return_conflict_for_duplicate() {
        let mut repo = MockGenreRepository::new();
        repo.expect_exists_by_name().returning(|_| Ok(true));
        repo.expect_create().never();

        let result = CreateGenreUseCase::new(Arc::new(repo)).execute("bebop").await;
        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }
}
