//! Add Track To Album Use Case

use std::sync::Arc;

use super::membership;
use crate::domain::gateways::{AlbumRepository, TrackRepository};
use crate::domain::models::{AlbumId, TrackId};
use crate::shared::errors::UseCaseError;

pub struct AddTrackToAlbumUseCase {
    album_repository: Arc<dyn AlbumRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl AddTrackToAlbumUseCase {
    #[must_use]
    pub fn new(album_repository: Arc<dyn AlbumRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            album_repository,
            track_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the album or track doesn't exist.
    /// Returns `UseCaseError::Conflict` if the track already belongs to an album.
    /// Returns `UseCaseError::Domain` with `LimitExceeded` when the album is full.
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

        membership::ensure_track_is_loose(track_id, track.album_id(), album_id)?;
        membership::ensure_album_has_room(self.track_repository.as_ref(), album_id).await?;
        membership::attach_track(self.track_repository.as_ref(), track_id, album_id).await?;
        self.album_repository.update(&album.touch()).await?;

        tracing::info!(album_id = %album_id, track_id = %track_id, "Track added to album");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockAlbumRepository, MockTrackRepository};
    use crate::shared::errors::DomainError;

    fn album_repo() -> (MockAlbumRepository, AlbumId) {
        let album = test_support::album();
        let id = *album.id();
        let mut repo = MockAlbumRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        (repo, id)
    }

    #[tokio::test]
    async fn should_attach_loose_track() {
        let (mut albums, album_id) = album_repo();
        albums.expect_update().times(1).returning(|a| Ok(Some(a.clone())));
        let track = test_support::track(None, 200);
        let track_id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_count_by_album().returning(|_| Ok(10));
        tracks
            .expect_attach_to_album()
            .withf(move |_, album, max| *album == album_id && *max == 50)
            .returning(|_, _, _| Ok(true));

        let result = AddTrackToAlbumUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&album_id, &track_id)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_reject_track_of_other_album() {
        let (albums, album_id) = album_repo();
        let track = test_support::track(Some(AlbumId::new()), 200);
        let track_id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_attach_to_album().never();

        let result = AddTrackToAlbumUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&album_id, &track_id)
            .await;
        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_enforce_fifty_track_limit() {
        let (albums, album_id) = album_repo();
        let track = test_support::track(None, 200);
        let track_id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_count_by_album().returning(|_| Ok(50));
        tracks.expect_attach_to_album().never();

        let result = AddTrackToAlbumUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&album_id, &track_id)
            .await;
        assert!(matches!(
            result,
            Err(UseCaseError::Domain(DomainError::LimitExceeded(_)))
        ));
    }

    #[tokio::test]
    async fn should_report_album_filled_concurrently() {
        let (mut albums, album_id) = album_repo();
        albums.expect_update().never();
        let track = test_support::track(None, 200);
        let track_id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_count_by_album().returning(|_| Ok(49));
        tracks.expect_attach_to_album().times(1).returning(|_, _, _| Ok(false));

        let result = AddTrackToAlbumUseCase::new(Arc::new(albums), Arc::new(tracks))
            .execute(&album_id, &track_id)
            .await;
        assert!(matches!(
            result,
            Err(UseCaseError::Domain(DomainError::LimitExceeded(_)))
        ));
    }
}
