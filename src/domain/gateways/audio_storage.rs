//! Audio Storage Gateway
//!
//! Blob store for uploaded audio files. Paths handed out are relative to the
//! storage root and are what gets persisted with the track.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::models::TrackId;
use crate::shared::errors::StorageError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioStorage: Send + Sync {
    /// Write the blob of a track and return its relative path
    async fn store(&self, track_id: &TrackId, extension: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Absolute path of an existing blob
    async fn resolve(&self, relative_path: &str) -> Result<PathBuf, StorageError>;

    /// Remove a blob
    async fn remove(&self, relative_path: &str) -> Result<(), StorageError>;
}
