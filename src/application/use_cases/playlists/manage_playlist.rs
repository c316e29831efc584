//! Owner-only Playlist Use Cases
//!
//! Updates, deletion and track membership. Every operation loads the
//! playlist first and rejects requesters other than its owner.

use std::sync::Arc;

use crate::domain::gateways::{PlaylistRepository, TrackRepository};
use crate::domain::models::rules::PLAYLIST_MAX_TRACKS;
use crate::domain::models::{Playlist, PlaylistId, TrackId, UpdatePlaylistData, UserId};
use crate::shared::errors::{DomainError, UseCaseError};

async fn load_owned(
    repository: &dyn PlaylistRepository,
    id: &PlaylistId,
    requester: &UserId,
) -> Result<Playlist, UseCaseError> {
    let playlist = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| UseCaseError::not_found("Playlist", id))?;

    if !playlist.is_owned_by(requester) {
        tracing::warn!(playlist_id = %id, user_id = %requester, "Playlist access denied");
        return Err(UseCaseError::Forbidden("only the owner can modify this playlist".to_string()));
    }
    Ok(playlist)
}

pub struct UpdatePlaylistUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
}

impl UpdatePlaylistUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>) -> Self {
        Self { playlist_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound`, `UseCaseError::Forbidden` for non-owners,
    /// or `UseCaseError::Domain` for invalid fields.
    pub async fn execute(
        &self,
        id: &PlaylistId,
        requester: &UserId,
        data: UpdatePlaylistData,
    ) -> Result<Playlist, UseCaseError> {
        let playlist = load_owned(self.playlist_repository.as_ref(), id, requester).await?;
        let updated = playlist.with_updates(data)?;
        let saved = self
            .playlist_repository
            .update(&updated)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Playlist", id))?;
        tracing::info!(playlist_id = %id, "Playlist updated");
        Ok(saved)
    }
}

pub struct DeletePlaylistUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
}

impl DeletePlaylistUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>) -> Self {
        Self { playlist_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` or `UseCaseError::Forbidden` for non-owners.
    pub async fn execute(&self, id: &PlaylistId, requester: &UserId) -> Result<(), UseCaseError> {
        load_owned(self.playlist_repository.as_ref(), id, requester).await?;
        if !self.playlist_repository.delete(id).await? {
            return Err(UseCaseError::not_found("Playlist", id));
        }
        tracing::info!(playlist_id = %id, "Playlist deleted");
        Ok(())
    }
}

pub struct AddTrackToPlaylistUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl AddTrackToPlaylistUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            playlist_repository,
            track_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the playlist or track doesn't exist,
    /// `UseCaseError::Forbidden` for non-owners, `UseCaseError::Conflict` for a
    /// duplicate, and `LimitExceeded` once the playlist holds 1000 tracks.
    pub async fn execute(&self, id: &PlaylistId, requester: &UserId, track_id: &TrackId) -> Result<(), UseCaseError> {
        let playlist = load_owned(self.playlist_repository.as_ref(), id, requester).await?;

        if self.track_repository.find_by_id(track_id).await?.is_none() {
            return Err(UseCaseError::not_found("Track", track_id));
        }
        if self.playlist_repository.contains_track(id, track_id).await? {
            return Err(UseCaseError::Conflict("track is already in this playlist".to_string()));
        }
        let playlist_full = || -> UseCaseError {
            DomainError::LimitExceeded(format!("a playlist can hold at most {PLAYLIST_MAX_TRACKS} tracks")).into()
        };
        if self.playlist_repository.count_tracks(id).await? >= PLAYLIST_MAX_TRACKS as i64 {
            return Err(playlist_full());
        }
        if !self
            .playlist_repository
            .add_track(id, track_id, PLAYLIST_MAX_TRACKS as i64)
            .await?
        {
            tracing::warn!(playlist_id = %id, "Playlist filled up concurrently");
            return Err(playlist_full());
        }
        self.playlist_repository.update(&playlist.touch()).await?;
        tracing::info!(playlist_id = %id, track_id = %track_id, "Track added to playlist");
        Ok(())
    }
}

pub struct RemoveTrackFromPlaylistUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
}

impl RemoveTrackFromPlaylistUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>) -> Self {
        Self { playlist_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track is not in the playlist,
    /// `UseCaseError::Forbidden` for non-owners.
    pub async fn execute(&self, id: &PlaylistId, requester: &UserId, track_id: &TrackId) -> Result<(), UseCaseError> {
        let playlist = load_owned(self.playlist_repository.as_ref(), id, requester).await?;

        if !self.playlist_repository.remove_track(id, track_id).await? {
            return Err(UseCaseError::not_found("Playlist track", track_id));
        }
        self.playlist_repository.update(&playlist.touch()).await?;
        tracing::info!(playlist_id = %id, track_id = %track_id, "Track removed from playlist");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockPlaylistRepository, MockTrackRepository};

    fn owned_playlist(owner: UserId) -> (MockPlaylistRepository, PlaylistId) {
        let playlist = test_support::playlist(owner);
        let id = *playlist.id();
        let mut repo = MockPlaylistRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(playlist)));
        (repo, id)
    }

    #[tokio::test]
    async fn should_forbid_non_owner_updates() {
        let (mut repo, id) = owned_playlist(UserId::new());
        repo.expect_update().never();

        let result = UpdatePlaylistUseCase::new(Arc::new(repo))
            .execute(&id, &UserId::new(), UpdatePlaylistData::default())
            .await;
        assert!(matches!(result, Err(UseCaseError::Forbidden(_))));
    }

    #[tokio::test]
    async fn should_forbid_non_owner_delete() {
        let (mut repo, id) = owned_playlist(UserId::new());
        repo.expect_delete().never();

        let result = DeletePlaylistUseCase::new(Arc::new(repo)).execute(&id, &UserId::new()).await;
        assert!(matches!(result, Err(UseCaseError::Forbidden(_))));
    }

    #[tokio::test]
    async fn should_add_track_and_touch_playlist() {
        let owner = UserId::new();
        let (mut repo, id) = owned_playlist(owner);
        repo.expect_contains_track().returning(|_, _| Ok(false));
        repo.expect_count_tracks().returning(|_| Ok(999));
        repo.expect_add_track().times(1).returning(|_, _, _| Ok(true));
        repo.expect_update().times(1).returning(|p| Ok(Some(p.clone())));
        let mut tracks = MockTrackRepository::new();
        tracks
            .expect_find_by_id()
            .returning(|_| Ok(Some(test_support::track(None, 200))));

        let result = AddTrackToPlaylistUseCase::new(Arc::new(repo), Arc::new(tracks))
            .execute(&id, &owner, &TrackId::new())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_reject_duplicate_track() {
        let owner = UserId::new();
        let (mut repo, id) = owned_playlist(owner);
        repo.expect_contains_track().returning(|_, _| Ok(true));
        repo.expect_add_track().never();
        let mut tracks = MockTrackRepository::new();
        tracks
            .expect_find_by_id()
            .returning(|_| Ok(Some(test_support::track(None, 200))));

        let result = AddTrackToPlaylistUseCase::new(Arc::new(repo), Arc::new(tracks))
            .execute(&id, &owner, &TrackId::new())
            .await;
        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_enforce_playlist_capacity() {
        let owner = UserId::new();
        let (mut repo, id) = owned_playlist(owner);
        repo.expect_contains_track().returning(|_, _| Ok(false));
        repo.expect_count_tracks().returning(|_| Ok(1000));
        repo.expect_add_track().never();
        let mut tracks = MockTrackRepository::new();
        tracks
            .expect_find_by_id()
            .returning(|_| Ok(Some(test_support::track(None, 200))));

        let result = AddTrackToPlaylistUseCase::new(Arc::new(repo), Arc::new(tracks))
            .execute(&id, &owner, &TrackId::new())
            .await;
        assert!(matches!(
            result,
            Err(UseCaseError::Domain(DomainError::LimitExceeded(_)))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_removing_absent_track() {
        let owner = UserId::new();
        let (mut repo, id) = owned_playlist(owner);
        repo.expect_remove_track().returning(|_, _| Ok(false));
        repo.expect_update().never();

        let result = RemoveTrackFromPlaylistUseCase::new(Arc::new(repo))
            .execute(&id, &owner, &TrackId::new())
            .await;
        assert!(matches!(result, Err(UseCaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn should_not_touch_playlist_filled_concurrently() {
        let owner = UserId::new();
        let (mut repo, id) = owned_playlist(owner);
        repo.expect_contains_track().returning(|_, _| Ok(false));
        repo.expect_count_tracks().returning(|_| Ok(999));
        repo.expect_add_track()
            .withf(|_, _, max| *max == 1000)
            .returning(|_, _, _| Ok(false));
        repo.expect_update().never();
        let mut tracks = MockTrackRepository::new();
        tracks
            .expect_find_by_id()
            .returning(|_| Ok(Some(test_support::track(None, 200))));

        let result = AddTrackToPlaylistUseCase::new(Arc::new(repo), Arc::new(tracks))
            .execute(&id, &owner, &TrackId::new())
            .await;
        assert!(matches!(
            result,
            Err(UseCaseError::Domain(DomainError::LimitExceeded(_)))
        ));
    }
}
