//! List Albums Use Case

use std::sync::Arc;

use crate::domain::gateways::AlbumRepository;
use crate::domain::models::Album;
use crate::shared::errors::UseCaseError;

pub struct ListAlbumsUseCase {
    album_repository: Arc<dyn AlbumRepository>,
}

impl ListAlbumsUseCase {
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>) -> Self {
        Self { album_repository }
    }

    /// All albums ordered by title
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self) -> Result<Vec<Album>, UseCaseError> {
        tracing::debug!("Listing albums");
        Ok(self.album_repository.find_all().await?)
    }
}
