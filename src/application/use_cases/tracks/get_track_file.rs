//! Get Track File Use Case
//!
//! Resolves the on-disk location of a track's audio for streaming.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::gateways::{AudioStorage, TrackRepository};
use crate::domain::models::{Track, TrackId};
use crate::shared::errors::{StorageError, UseCaseError};

pub struct GetTrackFileUseCase {
    track_repository: Arc<dyn TrackRepository>,
    audio_storage: Arc<dyn AudioStorage>,
}

impl GetTrackFileUseCase {
    #[must_use]
    pub fn new(track_repository: Arc<dyn TrackRepository>, audio_storage: Arc<dyn AudioStorage>) -> Self {
        Self {
            track_repository,
            audio_storage,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track or its blob is missing.
    pub async fn execute(&self, id: &TrackId) -> Result<(Track, PathBuf), UseCaseError> {
        let track = self
            .track_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", id))?;

        match self.audio_storage.resolve(track.file_path()).await {
            Ok(path) => Ok((track, path)),
            Err(StorageError::NotFound(path)) => {
                tracing::error!(track_id = %id, path = %path, "Track blob is missing");
                Err(UseCaseError::not_found("Track file", id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
