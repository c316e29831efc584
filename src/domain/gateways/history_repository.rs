//! Listening History Repository Gateway

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::{HistoryEntry, NewPlayback, TrackId, UserId};
use crate::shared::errors::RepositoryError;

/// Append-only log of playbacks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append a playback unless the user already played the track
    /// `max_plays` times at or after `since`. Returns `false` when throttled.
    async fn append_unless_throttled(
        &self,
        playback: &NewPlayback,
        since: DateTime<Utc>,
        max_plays: i64,
    ) -> Result<bool, RepositoryError>;

    /// Number of times `user_id` played `track_id` at or after `since`
    async fn count_recent_plays(
        &self,
        user_id: &UserId,
        track_id: &TrackId,
        since: DateTime<Utc>,
    ) -> Result<i64, RepositoryError>;

    /// Newest entries of a user, at most `limit`
    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<HistoryEntry>, RepositoryError>;

    /// Entries of a user at or after `since`, newest first
    async fn find_since(&self, user_id: &UserId, since: DateTime<Utc>) -> Result<Vec<HistoryEntry>, RepositoryError>;
}
