//! Delete Track Use Case

use std::sync::Arc;

use crate::domain::gateways::{AudioStorage, TrackRepository};
use crate::domain::models::TrackId;
use crate::shared::errors::UseCaseError;

/// Removes a track row, then its blob. A missing blob is only logged.
pub struct DeleteTrackUseCase {
    track_repository: Arc<dyn TrackRepository>,
    audio_storage: Arc<dyn AudioStorage>,
}

impl DeleteTrackUseCase {
    #[must_use]
    pub fn new(track_repository: Arc<dyn TrackRepository>, audio_storage: Arc<dyn AudioStorage>) -> Self {
        Self {
            track_repository,
            audio_storage,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track doesn't exist.
    pub async fn execute(&self, id: &TrackId) -> Result<(), UseCaseError> {
        let track = self
            .track_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", id))?;

        if !self.track_repository.delete(id).await? {
            return Err(UseCaseError::not_found("Track", id));
        }

        if let Err(e) = self.audio_storage.remove(track.file_path()).await {
            tracing::warn!(track_id = %id, path = %track.file_path(), error = %e, "Could not remove track blob");
        }

        tracing::info!(track_id = %id, "Track deleted");
        Ok(())
    }
}
