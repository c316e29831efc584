//! Playlist Repository Gateway

use async_trait::async_trait;

use crate::domain::models::{Playlist, PlaylistId, Track, TrackId, UserId};
use crate::shared::errors::RepositoryError;

/// Repository trait for Playlist persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, RepositoryError>;

    /// Playlists of a user, newest first
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Playlist>, RepositoryError>;

    async fn create(&self, playlist: &Playlist) -> Result<Playlist, RepositoryError>;

    async fn update(&self, playlist: &Playlist) -> Result<Option<Playlist>, RepositoryError>;

    async fn delete(&self, id: &PlaylistId) -> Result<bool, RepositoryError>;

    /// Tracks of a playlist, most recently added first
    async fn find_tracks(&self, id: &PlaylistId) -> Result<Vec<Track>, RepositoryError>;

    async fn count_tracks(&self, id: &PlaylistId) -> Result<i64, RepositoryError>;

    async fn contains_track(&self, id: &PlaylistId, track_id: &TrackId) -> Result<bool, RepositoryError>;

    /// Returns `false` when the playlist already holds `max_tracks` tracks
    async fn add_track(&self, id: &PlaylistId, track_id: &TrackId, max_tracks: i64) -> Result<bool, RepositoryError>;

    async fn remove_track(&self, id: &PlaylistId, track_id: &TrackId) -> Result<bool, RepositoryError>;
}
