//! Upload Track Use Case
//!
//! Validates an uploaded audio file, writes the blob and records the track.

use std::sync::Arc;

use crate::application::use_cases::albums::membership;
use crate::domain::gateways::{AlbumRepository, AudioStorage, TrackRepository};
use crate::domain::models::rules::ALBUM_MAX_TRACKS;
use crate::domain::models::track::{audio_extension, normalize_artist, normalize_title};
use crate::domain::models::{NewTrack, Track, TrackId, UploadPolicy, UploadTrackData};
use crate::shared::errors::{DomainError, UseCaseError};

pub struct UploadTrackUseCase {
    track_repository: Arc<dyn TrackRepository>,
    album_repository: Arc<dyn AlbumRepository>,
    audio_storage: Arc<dyn AudioStorage>,
    policy: UploadPolicy,
}

impl UploadTrackUseCase {
    #[must_use]
    pub fn new(
        track_repository: Arc<dyn TrackRepository>,
        album_repository: Arc<dyn AlbumRepository>,
        audio_storage: Arc<dyn AudioStorage>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            track_repository,
            album_repository,
            audio_storage,
            policy,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::PayloadTooLarge` or `UseCaseError::UnsupportedMediaType`
    /// when the file violates the upload policy.
    /// Returns `UseCaseError::Validation` / `UseCaseError::Domain` for bad metadata.
    /// Returns `UseCaseError::NotFound` if the album doesn't exist.
    /// Returns `UseCaseError::Storage` if the blob cannot be written.
    pub async fn execute(&self, data: UploadTrackData) -> Result<Track, UseCaseError> {
        let size = data.bytes.len() as u64;
        if size > self.policy.max_file_size_bytes {
            tracing::warn!(size, max = self.policy.max_file_size_bytes, "Rejected oversized upload");
            return Err(UseCaseError::PayloadTooLarge(format!(
                "file exceeds the maximum size of {} bytes",
                self.policy.max_file_size_bytes
            )));
        }
        if !self.policy.allows(&data.content_type) {
            tracing::warn!(content_type = %data.content_type, "Rejected upload content type");
            return Err(UseCaseError::UnsupportedMediaType(format!(
                "content type '{}' is not allowed",
                data.content_type
            )));
        }
        if data.bytes.is_empty() {
            return Err(UseCaseError::validation("file: uploaded file is empty"));
        }

        let title = normalize_title(&data.title)?;
        let artist_name = normalize_artist(&data.artist_name)?;
        if data.duration_secs < 0 {
            return Err(DomainError::Validation("duration cannot be negative".to_string()).into());
        }
        let album_id = data
            .album_id
            .ok_or_else(|| UseCaseError::validation("album_id: album is required"))?;

        if self.album_repository.find_by_id(&album_id).await?.is_none() {
            return Err(UseCaseError::not_found("Album", album_id));
        }
        membership::ensure_album_has_room(self.track_repository.as_ref(), &album_id).await?;

        let track_id = TrackId::new();
        tracing::info!(
            track_id = %track_id,
            album_id = %album_id,
            file_name = data.file_name.as_deref().unwrap_or("-"),
            size,
            "Uploading track"
        );

        let file_path = self
            .audio_storage
            .store(&track_id, audio_extension(&data.content_type), &data.bytes)
            .await?;

        let track = Track::new(
            track_id,
            NewTrack {
                title,
                artist_name,
                album_id: Some(album_id),
                duration_secs: data.duration_secs,
                cover_url: data.cover_url,
                file_path: file_path.clone(),
                content_type: data.content_type,
                file_size: size as i64,
            },
        )?;

        let outcome = match self.track_repository.create(&track, ALBUM_MAX_TRACKS as i64).await {
            Ok(Some(created)) => Ok(created),
            Ok(None) => {
                tracing::warn!(track_id = %track_id, album_id = %album_id, "Album filled up during upload");
                Err(membership::album_full())
            }
            Err(e) => {
                tracing::error!(track_id = %track_id, error = %e, "Failed to record track");
                Err(e.into())
            }
        };

        match outcome {
            Ok(created) => {
                tracing::info!(track_id = %created.id(), "Track uploaded");
                Ok(created)
            }
            Err(e) => {
                if let Err(cleanup) = self.audio_storage.remove(&file_path).await {
                    tracing::warn!(path = %file_path, error = %cleanup, "Failed to remove orphaned blob");
                }
                Err(e)
            }
        }
    }
}
