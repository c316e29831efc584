//! Update Album Use Case

use std::sync::Arc;

use crate::domain::gateways::AlbumRepository;
use crate::domain::models::{Album, AlbumId, UpdateAlbumData};
use crate::shared::errors::UseCaseError;

/// Use case for partial album updates
pub struct UpdateAlbumUseCase {
    album_repository: Arc<dyn AlbumRepository>,
}

impl UpdateAlbumUseCase {
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>) -> Self {
        Self { album_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the album doesn't exist.
    /// Returns `UseCaseError::Conflict` if the new title is taken by another album.
    /// Returns `UseCaseError::Domain` if a field is invalid.
    pub async fn execute(&self, id: &AlbumId, data: UpdateAlbumData) -> Result<Album, UseCaseError> {
        tracing::info!(album_id = %id, "Updating album");

        let existing = self.album_repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(album_id = %id, "Album not found for update");
            UseCaseError::not_found("Album", id)
        })?;

        let previous_title = existing.title().to_lowercase();
        let updated = existing.with_updates(data)?;

        if updated.title().to_lowercase() != previous_title
            && self.album_repository.exists_by_title(updated.title(), Some(*id)).await?
        {
            tracing::warn!(album_id = %id, title = %updated.title(), "Cannot update: title already exists");
            return Err(UseCaseError::Conflict(format!(
                "album '{}' already exists",
                updated.title()
            )));
        }

        let saved = self
            .album_repository
            .update(&updated)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Album", id))?;

        tracing::info!(album_id = %id, "Album updated successfully");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::MockAlbumRepository;

    #[tokio::test]
    async fn should_skip_uniqueness_check_when_title_unchanged() {
        let album = test_support::album();
        let id = *album.id();
        let mut repo = MockAlbumRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        repo.expect_exists_by_title().never();
        repo.expect_update().returning(|a| Ok(Some(a.clone())));

        let updated = UpdateAlbumUseCase::new(Arc::new(repo))
            .execute(
                &id,
                UpdateAlbumData {
                    title: Some("KIND OF BLUE".to_string()),
                    artist: Some("Miles Davis Sextet".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.artist(), "Miles Davis Sextet");
    }

    #[tokio::test]
    async fn should_return_conflict_for_taken_title() {
        let album = test_support::album();
        let id = *album.id();
        let mut repo = MockAlbumRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        repo.expect_exists_by_title().returning(|_, _| Ok(true));
        repo.expect_update().never();

        let result = UpdateAlbumUseCase::new(Arc::new(repo))
            .execute(
                &id,
                UpdateAlbumData {
                    title: Some("Giant Steps".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }
}
