//! Track Repository Gateway

use async_trait::async_trait;

use crate::domain::models::{AlbumId, Track, TrackId};
use crate::shared::errors::RepositoryError;

/// Repository trait for Track persistence operations.
/// Every returned track carries its play count.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackRepository: Send + Sync {
    async fn find_by_id(&self, id: &TrackId) -> Result<Option<Track>, RepositoryError>;

    /// Case-insensitive substring search over title and artist, ordered by title
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Track>, RepositoryError>;

    /// Tracks of an album, ordered by `added_at` then id
    async fn find_by_album(&self, album_id: &AlbumId) -> Result<Vec<Track>, RepositoryError>;

    async fn count_by_album(&self, album_id: &AlbumId) -> Result<i64, RepositoryError>;

    /// Insert a track unless its album already holds `max_album_tracks` tracks.
    /// Returns `None` when the album is full.
    async fn create(&self, track: &Track, max_album_tracks: i64) -> Result<Option<Track>, RepositoryError>;

    async fn update(&self, track: &Track) -> Result<Option<Track>, RepositoryError>;

    /// Attach the track to an album holding fewer than `max_tracks` other tracks.
    /// Returns `false` when the album is full.
    async fn attach_to_album(&self, id: &TrackId, album_id: &AlbumId, max_tracks: i64) -> Result<bool, RepositoryError>;
    /// Detach the track from its album
    async fn clear_album(&self, id: &TrackId) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &TrackId) -> Result<bool, RepositoryError>;
}
