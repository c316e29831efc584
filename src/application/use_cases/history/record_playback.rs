//! Record Playback Use Case
//!
//! Appends a listen to the user's history, subject to the minimum duration
//! and the per-track anti-spam window.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::gateways::{HistoryRepository, TrackRepository};
use crate::domain::models::history::{ensure_countable, ensure_not_throttled, throttle_window_start};
use crate::domain::models::rules::{PLAYBACK_THROTTLE_MAX_PLAYS, PLAYBACK_THROTTLE_WINDOW_SECS};
use crate::domain::models::{NewPlayback, TrackId, UserId};
use crate::shared::errors::{DomainError, UseCaseError};

pub struct RecordPlaybackUseCase {
    history_repository: Arc<dyn HistoryRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl RecordPlaybackUseCase {
    #[must_use]
    pub fn new(history_repository: Arc<dyn HistoryRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            history_repository,
            track_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track doesn't exist.
    /// Returns `UseCaseError::Domain` with `TrackTooShort` or `PlaybackThrottled`.
    pub async fn execute(&self, user_id: &UserId, track_id: &TrackId) -> Result<(), UseCaseError> {
        let track = self
            .track_repository
            .find_by_id(track_id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", track_id))?;

        ensure_countable(track.duration_secs())?;

        let since = throttle_window_start(Utc::now());
        let recent = self
            .history_repository
            .count_recent_plays(user_id, track_id, since)
            .await?;
        if let Err(e) = ensure_not_throttled(recent) {
            tracing::warn!(user_id = %user_id, track_id = %track_id, recent, "Playback throttled");
            return Err(e.into());
        }

        let recorded = self
            .history_repository
            .append_unless_throttled(&NewPlayback::now(*user_id, *track_id), since, PLAYBACK_THROTTLE_MAX_PLAYS)
            .await?;
        if !recorded {
            tracing::warn!(user_id = %user_id, track_id = %track_id, "Playback throttled concurrently");
            return Err(DomainError::PlaybackThrottled {
                plays: PLAYBACK_THROTTLE_MAX_PLAYS,
                window_secs: PLAYBACK_THROTTLE_WINDOW_SECS,
            }
            .into());
        }
        tracing::info!(user_id = %user_id, track_id = %track_id, "Playback recorded");
        Ok(())
    }
}
