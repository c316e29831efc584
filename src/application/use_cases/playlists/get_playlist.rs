//! Get Playlist Use Cases
//!
//! Read access to a playlist with or without its tracks.

use std::sync::Arc;

use crate::domain::gateways::PlaylistRepository;
use crate::domain::models::{PlaylistId, PlaylistWithTracks, Track};
use crate::shared::errors::UseCaseError;

pub struct GetPlaylistUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
}

impl GetPlaylistUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>) -> Self {
        Self { playlist_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the playlist doesn't exist.
    pub async fn execute(&self, id: &PlaylistId) -> Result<PlaylistWithTracks, UseCaseError> {
        let playlist = self
            .playlist_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Playlist", id))?;
        let tracks = self.playlist_repository.find_tracks(id).await?;
        Ok(PlaylistWithTracks { playlist, tracks })
    }
}

pub struct GetPlaylistTracksUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
}

impl GetPlaylistTracksUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>) -> Self {
        Self { playlist_repository }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the playlist doesn't exist.
    pub async fn execute(&self, id: &PlaylistId) -> Result<Vec<Track>, UseCaseError> {
        if self.playlist_repository.find_by_id(id).await?.is_none() {
            return Err(UseCaseError::not_found("Playlist", id));
        }
        Ok(self.playlist_repository.find_tracks(id).await?)
    }
}
