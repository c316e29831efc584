//! Genre Repository Gateway
//!
//! Genres and their many-to-many assignment to tracks.

use async_trait::async_trait;

use crate::domain::models::{Genre, GenreId, TrackId};
use crate::shared::errors::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, RepositoryError>;

    /// All genres sorted by name
    async fn find_all(&self) -> Result<Vec<Genre>, RepositoryError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    async fn create(&self, genre: &Genre) -> Result<Genre, RepositoryError>;

    async fn delete(&self, id: &GenreId) -> Result<bool, RepositoryError>;

    /// Genres assigned to a track, sorted by name
    async fn find_by_track(&self, track_id: &TrackId) -> Result<Vec<Genre>, RepositoryError>;

    async fn count_by_track(&self, track_id: &TrackId) -> Result<i64, RepositoryError>;

    async fn is_assigned(&self, track_id: &TrackId, genre_id: &GenreId) -> Result<bool, RepositoryError>;

    /// Returns `false` when the track already has `max_genres` genres
    async fn assign(&self, track_id: &TrackId, genre_id: &GenreId, max_genres: i64) -> Result<bool, RepositoryError>;

    /// Remove an assignment, returning whether it existed
    async fn unassign(&self, track_id: &TrackId, genre_id: &GenreId) -> Result<bool, RepositoryError>;
}
