//! Create Album Use Case

use std::sync::Arc;

use crate::domain::gateways::AlbumRepository;
use crate::domain::models::{Album, CreateAlbumData};
use crate::shared::errors::UseCaseError;

/// Use case for creating a new album
pub struct CreateAlbumUseCase {
    album_repository: Arc<dyn AlbumRepository>,
}

impl CreateAlbumUseCase {
    /// Create a new CreateAlbumUseCase
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>) -> Self {
        Self { album_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if the album data is invalid.
    /// Returns `UseCaseError::Conflict` if an album with the same title already exists.
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, data: CreateAlbumData) -> Result<Album, UseCaseError> {
        // Validates and trims before the uniqueness check
        let album = Album::new(data)?;

        tracing::info!(title = %album.title(), artist = %album.artist(), "Creating new album");

        if self.album_repository.exists_by_title(album.title(), None).await? {
            tracing::warn!(title = %album.title(), "Album with title already exists");
            return Err(UseCaseError::Conflict(format!(
                "album '{}' already exists",
                album.title()
            )));
        }

        let created = self.album_repository.create(&album).await?;

        tracing::info!(album_id = %created.id(), "Album created successfully");
        Ok(created)
    }
}
