//! Listening History DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{HistoryEntry, ListenedTrack};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentPlaysQuery {
    pub hours: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListenedTrackDto {
    pub id: Uuid,
    pub title: String,
    pub artist_name: String,
    pub duration: i32,
    pub cover_url: Option<String>,
    pub album_id: Option<Uuid>,
    pub album_title: Option<String>,
}

impl From<ListenedTrack> for ListenedTrackDto {
    fn from(track: ListenedTrack) -> Self {
        Self {
            id: *track.id.as_uuid(),
            title: track.title,
            artist_name: track.artist_name,
            duration: track.duration_secs,
            cover_url: track.cover_url,
            album_id: track.album_id.map(|id| *id.as_uuid()),
            album_title: track.album_title,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponseDto {
    pub id: Uuid,
    pub listened_at: DateTime<Utc>,
    pub track: ListenedTrackDto,
}

impl From<HistoryEntry> for HistoryEntryResponseDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            listened_at: entry.listened_at,
            track: entry.track.into(),
        }
    }
}
