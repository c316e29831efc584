//! Album Repository Gateway

use async_trait::async_trait;

use crate::domain::models::{Album, AlbumId};
use crate::shared::errors::RepositoryError;

/// Repository trait for Album persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, RepositoryError>;

    /// All albums sorted by title ascending
    async fn find_all(&self) -> Result<Vec<Album>, RepositoryError>;

    async fn create(&self, album: &Album) -> Result<Album, RepositoryError>;

    async fn update(&self, album: &Album) -> Result<Option<Album>, RepositoryError>;

    /// Delete an album; its tracks are detached, not removed
    async fn delete(&self, id: &AlbumId) -> Result<bool, RepositoryError>;

    /// Check if a title exists (case-insensitive), optionally excluding one album
    async fn exists_by_title(&self, title: &str, exclude_id: Option<AlbumId>) -> Result<bool, RepositoryError>;
}
