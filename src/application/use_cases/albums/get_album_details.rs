//! Get Album Details Use Case

use std::sync::Arc;

use crate::domain::gateways::{AlbumRepository, TrackRepository};
use crate::domain::models::{AlbumId, AlbumWithTracks};
use crate::shared::errors::UseCaseError;

pub struct GetAlbumDetailsUseCase {
    album_repository: Arc<dyn AlbumRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl GetAlbumDetailsUseCase {
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            album_repository,
            track_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the album doesn't exist.
    pub async fn execute(&self, id: &AlbumId) -> Result<AlbumWithTracks, UseCaseError> {
        tracing::debug!(album_id = %id, "Fetching album details");

        let album = self
            .album_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Album", id))?;
        let tracks = self.track_repository.find_by_album(id).await?;

        Ok(AlbumWithTracks { album, tracks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockAlbumRepository, MockTrackRepository};

    #[tokio::test]
    async fn should_return_album_with_tracks() {
        let album = test_support::album();
        let id = *album.id();
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        let mut tracks = MockTrackRepository::new();
        tracks
            .expect_find_by_album()
            .returning(move |_| Ok(vec![test_support::track(Some(id), 300), test_support::track(Some(id), 240)]));

        let details = GetAlbumDetailsUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&id)
            .await
            .unwrap();
        assert_eq!(details.tracks.len(), 2);
    }
}
