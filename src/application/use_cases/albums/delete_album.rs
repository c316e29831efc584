//! Delete Album Use Case

use std::sync::Arc;

use crate::domain::gateways::AlbumRepository;
use crate::domain::models::AlbumId;
use crate::shared::errors::UseCaseError;

/// Deletes an album; its tracks stay in the catalog without an album
pub struct DeleteAlbumUseCase {
    album_repository: Arc<dyn AlbumRepository>,
}

impl DeleteAlbumUseCase {
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>) -> Self {
        Self { album_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the album doesn't exist.
    pub async fn execute(&self, id: &AlbumId) -> Result<(), UseCaseError> {
        tracing::info!(album_id = %id, "Deleting album");

        if !self.album_repository.delete(id).await? {
            tracing::warn!(album_id = %id, "Album not found for deletion");
            return Err(UseCaseError::not_found("Album", id));
        }

        tracing::info!(album_id = %id, "Album deleted successfully");
        Ok(())
    }
}
