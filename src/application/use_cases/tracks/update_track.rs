//! Update Track Use Case (PATCH)

use std::sync::Arc;

use crate::application::use_cases::albums::membership;
use crate::domain::gateways::{AlbumRepository, TrackRepository};
use crate::domain::models::{Track, TrackId, UpdateTrackData};
use crate::shared::errors::UseCaseError;

pub struct UpdateTrackUseCase {
    track_repository: Arc<dyn TrackRepository>,
    album_repository: Arc<dyn AlbumRepository>,
}

impl UpdateTrackUseCase {
    #[must_use]
    pub fn new(track_repository: Arc<dyn TrackRepository>, album_repository: Arc<dyn AlbumRepository>) -> Self {
        Self {
            track_repository,
            album_repository,
        }
    }

    /// Execute the use case
    ///
    /// Moving a track into an album follows the same membership rules as
    /// adding it to the album directly.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track or the new album doesn't exist.
    /// Returns `UseCaseError::Conflict` if the track already belongs to another album.
    /// Returns `UseCaseError::Domain` if a field is invalid or the new album is full.
    pub async fn execute(&self, id: &TrackId, data: UpdateTrackData) -> Result<Track, UseCaseError> {
        tracing::info!(track_id = %id, "Updating track");

        let existing = self
            .track_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", id))?;

        let target_album = match data.album_id {
            Some(album_id) if existing.album_id() != Some(&album_id) => {
                let album = self
                    .album_repository
                    .find_by_id(&album_id)
                    .await?
                    .ok_or_else(|| UseCaseError::not_found("Album", album_id))?;
                membership::ensure_track_is_loose(id, existing.album_id(), &album_id)?;
                membership::ensure_album_has_room(self.track_repository.as_ref(), &album_id).await?;
                Some(album)
            }
            _ => None,
        };

        let updated = existing.with_updates(data)?;

        if let Some(album) = &target_album {
            membership::attach_track(self.track_repository.as_ref(), id, album.id()).await?;
        }
        let saved = self
            .track_repository
            .update(&updated)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", id))?;
        if let Some(album) = target_album {
            self.album_repository.update(&album.touch()).await?;
        }

        tracing::info!(track_id = %id, "Track updated");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockAlbumRepository, MockTrackRepository};
    use crate::domain::models::AlbumId;
    use crate::shared::errors::DomainError;

    fn existing_album() -> (MockAlbumRepository, AlbumId) {
        let album = test_support::album();
        let album_id = *album.id();
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        (albums, album_id)
    }

    #[tokio::test]
    async fn should_rename_track() {
        let track = test_support::track(None, 200);
        let id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_update().returning(|t| Ok(Some(t.clone())));

        let updated = UpdateTrackUseCase::new(Arc::new(tracks), Arc::new(MockAlbumRepository::new()))
            .execute(
                &id,
                UpdateTrackData {
                    title: Some("Freddie Freeloader".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title(), "Freddie Freeloader");
    }

    #[tokio::test]
    async fn should_reject_unknown_album() {
        let track = test_support::track(None, 200);
        let id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_update().never();
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().returning(|_| Ok(None));

        let result = UpdateTrackUseCase::new(Arc::new(tracks), Arc::new(albums))
            .execute(
                &id,
                UpdateTrackData {
                    album_id: Some(AlbumId::new()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn should_not_move_track_into_full_album() {
        let track = test_support::track(None, 200);
        let id = *track.id();
        let (mut albums, album_id) = existing_album();
        albums.expect_update().never();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_count_by_album().returning(|_| Ok(50));
        tracks.expect_attach_to_album().never();
        tracks.expect_update().never();

        let result = UpdateTrackUseCase::new(Arc::new(tracks), Arc::new(albums))
            .execute(
                &id,
                UpdateTrackData {
                    album_id: Some(album_id),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(UseCaseError::Domain(DomainError::LimitExceeded(_)))
        ));
    }

    #[tokio::test]
    async fn should_not_move_track_between_albums() {
        let track = test_support::track(Some(AlbumId::new()), 200);
        let id = *track.id();
        let (albums, album_id) = existing_album();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_attach_to_album().never();
        tracks.expect_update().never();

        let result = UpdateTrackUseCase::new(Arc::new(tracks), Arc::new(albums))
            .execute(
                &id,
                UpdateTrackData {
                    album_id: Some(album_id),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_attach_loose_track_and_touch_album() {
        let track = test_support::track(None, 200);
        let id = *track.id();
        let (mut albums, album_id) = existing_album();
        albums.expect_update().times(1).returning(|a| Ok(Some(a.clone())));
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_count_by_album().returning(|_| Ok(12));
        tracks
            .expect_attach_to_album()
            .withf(move |_, album, _| *album == album_id)
            .times(1)
            .returning(|_, _, _| Ok(true));
        tracks.expect_update().returning(|t| Ok(Some(t.clone())));

        let updated = UpdateTrackUseCase::new(Arc::new(tracks), Arc::new(albums))
            .execute(
                &id,
                UpdateTrackData {
                    album_id: Some(album_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.album_id(), Some(&album_id));
    }

    #[tokio::test]
    async fn should_keep_same_album_without_membership_checks() {
        let album_id = AlbumId::new();
        let track = test_support::track(Some(album_id), 200);
        let id = *track.id();
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().never();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        tracks.expect_count_by_album().never();
        tracks.expect_update().returning(|t| Ok(Some(t.clone())));

        let updated = UpdateTrackUseCase::new(Arc::new(tracks), Arc::new(albums))
            .execute(
                &id,
                UpdateTrackData {
                    album_id: Some(album_id),
                    title: Some("Blue in Green".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title(), "Blue in Green");
    }
}
