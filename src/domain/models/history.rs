//! Listening History Domain Model

use chrono::{DateTime, Duration, Utc};

use super::ids::{AlbumId, HistoryEntryId, TrackId, UserId};
use super::rules::{
    PLAYBACK_MIN_DURATION_SECS, PLAYBACK_THROTTLE_MAX_PLAYS, PLAYBACK_THROTTLE_WINDOW_SECS,
    RECENT_PLAYS_DEFAULT_HOURS, RECENT_PLAYS_MAX_HOURS,
};
use crate::shared::errors::DomainError;

/// Summary of the track a history entry points at
#[derive(Debug, Clone)]
pub struct ListenedTrack {
    pub id: TrackId,
    pub title: String,
    pub artist_name: String,
    pub duration_secs: i32,
    pub cover_url: Option<String>,
    pub album_id: Option<AlbumId>,
    pub album_title: Option<String>,
}

/// One playback of a track by a user
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    pub user_id: UserId,
    pub listened_at: DateTime<Utc>,
    pub track: ListenedTrack,
}

/// A playback about to be appended to the history
#[derive(Debug, Clone)]
pub struct NewPlayback {
    pub id: HistoryEntryId,
    pub user_id: UserId,
    pub track_id: TrackId,
    pub listened_at: DateTime<Utc>,
}

impl NewPlayback {
    /// A playback stamped with the current time
    #[must_use]
    pub fn now(user_id: UserId, track_id: TrackId) -> Self {
        Self {
            id: HistoryEntryId::new(),
            user_id,
            track_id,
            listened_at: Utc::now(),
        }
    }
}

/// Reject tracks too short to count as a listen
///
/// # Errors
///
/// Returns `DomainError::TrackTooShort` below the minimum duration.
pub fn ensure_countable(duration_secs: i32) -> Result<(), DomainError> {
    if duration_secs < PLAYBACK_MIN_DURATION_SECS {
        return Err(DomainError::TrackTooShort {
            duration_secs,
            min_secs: PLAYBACK_MIN_DURATION_SECS,
        });
    }
    Ok(())
}

/// Start of the anti-spam window ending at `now`
#[must_use]
pub fn throttle_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(PLAYBACK_THROTTLE_WINDOW_SECS)
}

/// Reject a playback when the track was already played too often in the window
///
/// # Errors
///
/// Returns `DomainError::PlaybackThrottled` once the limit is reached.
pub fn ensure_not_throttled(recent_plays: i64) -> Result<(), DomainError> {
    if recent_plays >= PLAYBACK_THROTTLE_MAX_PLAYS {
        return Err(DomainError::PlaybackThrottled {
            plays: recent_plays,
            window_secs: PLAYBACK_THROTTLE_WINDOW_SECS,
        });
    }
    Ok(())
}

/// Resolve the look-back window for recent plays
///
/// # Errors
///
/// Returns `DomainError::Validation` outside 1 to 720 hours.
pub fn recent_window_hours(hours: Option<i64>) -> Result<i64, DomainError> {
    let hours = hours.unwrap_or(RECENT_PLAYS_DEFAULT_HOURS);
    if !(1..=RECENT_PLAYS_MAX_HOURS).contains(&hours) {
        return Err(DomainError::Validation(format!(
            "hours must be between 1 and {RECENT_PLAYS_MAX_HOURS}"
        )));
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tracks_are_not_countable() {
        assert!(matches!(
            ensure_countable(29),
            Err(DomainError::TrackTooShort { duration_secs: 29, min_secs: 30 })
        ));
        assert!(ensure_countable(30).is_ok());
    }

    #[test]
    fn third_play_in_window_is_the_last_allowed() {
        assert!(ensure_not_throttled(2).is_ok());
        assert!(matches!(
            ensure_not_throttled(3),
            Err(DomainError::PlaybackThrottled { plays: 3, .. })
        ));
    }

    #[test]
    fn window_is_five_minutes() {
        let now = Utc::now();
        assert_eq!(now - throttle_window_start(now), Duration::minutes(5));
    }

    #[test]
    fn recent_window_defaults_and_bounds() {
        assert_eq!(recent_window_hours(None).unwrap(), 24);
        assert_eq!(recent_window_hours(Some(720)).unwrap(), 720);
        assert!(recent_window_hours(Some(0)).is_err());
        assert!(recent_window_hours(Some(721)).is_err());
    }
}
