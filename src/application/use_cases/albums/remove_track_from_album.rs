//! Remove Track From Album Use Case

use std::sync::Arc;

use crate::domain::gateways::{AlbumRepository, TrackRepository};
use crate::domain::models::{AlbumId, TrackId};
use crate::shared::errors::UseCaseError;

pub struct RemoveTrackFromAlbumUseCase {
    album_repository: Arc<dyn AlbumRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl RemoveTrackFromAlbumUseCase {
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            album_repository,
            track_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the album or track doesn't exist.
    /// Returns `UseCaseError::Validation` if the track is not part of the album.
    pub async fn execute(&self, album_id: &AlbumId, track_id: &TrackId) -> Result<(), UseCaseError> {
        let album = self
            .album_repository
            .find_by_id(album_id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Album", album_id))?;
        let track = self
            .track_repository
            .find_by_id(track_id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", track_id))?;

        if track.album_id() != Some(album_id) {
            return Err(UseCaseError::validation("track_id: track does not belong to this album"));
        }

        self.track_repository.clear_album(track_id).await?;
        self.album_repository.update(&album.touch()).await?;

        tracing::info!(album_id = %album_id, track_id = %track_id, "Track removed from album");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockAlbumRepository, MockTrackRepository};

    #[tokio::test]
    async fn should_reject_track_outside_album() {
        let album = test_support::album();
        let album_id = *album.id();
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        let track = test_support::track(None, 200);
        let track_id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_clear_album().never();

        let result = RemoveTrackFromAlbumUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&album_id, &track_id)
            .await;
        assert!(matches!(result, Err(UseCaseError::Validation(_))));
    }

    #[tokio::test]
    async fn should_detach_track() {
        let album = test_support::album();
        let album_id = *album.id();
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        albums.expect_update().returning(|a| Ok(Some(a.clone())));
        let track = test_support::track(Some(album_id), 200);
        let track_id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_clear_album().times(1).returning(|_| Ok(true));

        let result = RemoveTrackFromAlbumUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&album_id, &track_id)
            .await;
        assert!(result.is_ok());
    }
}
