//! Album membership rules shared by the album and track use cases

use crate::domain::gateways::TrackRepository;
use crate::domain::models::rules::ALBUM_MAX_TRACKS;
use crate::domain::models::{AlbumId, TrackId};
use crate::shared::errors::{DomainError, UseCaseError};

/// Error returned once an album holds the maximum number of tracks
pub(crate) fn album_full() -> UseCaseError {
    DomainError::LimitExceeded(format!("album already has {ALBUM_MAX_TRACKS} tracks")).into()
}

/// A track may only join an album while it belongs to none
pub(crate) fn ensure_track_is_loose(
    track_id: &TrackId,
    current: Option<&AlbumId>,
    album_id: &AlbumId,
) -> Result<(), UseCaseError> {
    match current {
        Some(current) if current == album_id => {
            Err(UseCaseError::Conflict("track is already in this album".to_string()))
        }
        Some(current) => {
            tracing::warn!(track_id = %track_id, album_id = %current, "Track belongs to another album");
            Err(UseCaseError::Conflict("track already belongs to another album".to_string()))
        }
        None => Ok(()),
    }
}

/// Fail fast when the album is already full
pub(crate) async fn ensure_album_has_room(
    track_repository: &dyn TrackRepository,
    album_id: &AlbumId,
) -> Result<(), UseCaseError> {
    if track_repository.count_by_album(album_id).await? >= ALBUM_MAX_TRACKS as i64 {
        tracing::warn!(album_id = %album_id, "Album track limit reached");
        return Err(album_full());
    }
    Ok(())
}

/// Attach a track, re-checking the limit atomically with the write
pub(crate) async fn attach_track(
    track_repository: &dyn TrackRepository,
    track_id: &TrackId,
    album_id: &AlbumId,
) -> Result<(), UseCaseError> {
    if !track_repository
        .attach_to_album(track_id, album_id, ALBUM_MAX_TRACKS as i64)
        .await?
    {
        tracing::warn!(album_id = %album_id, track_id = %track_id, "Album filled up concurrently");
        return Err(album_full());
    }
    Ok(())
}
