//! Track Domain Model
//!
//! Catalog tracks backed by an audio blob on disk.

use chrono::{DateTime, Utc};

use super::album::Album;
use super::genre::Genre;
use super::ids::{AlbumId, TrackId};
use super::rules::{check_length, non_blank, TRACK_ARTIST_MAX_CHARS, TRACK_TITLE_MAX_CHARS};
use crate::shared::errors::DomainError;

/// Upload request for a new track, including the raw audio bytes
#[derive(Debug, Clone)]
pub struct UploadTrackData {
    pub title: String,
    pub artist_name: String,
    pub album_id: Option<AlbumId>,
    pub duration_secs: i32,
    pub cover_url: Option<String>,
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Validated metadata plus the stored blob location
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub title: String,
    pub artist_name: String,
    pub album_id: Option<AlbumId>,
    pub duration_secs: i32,
    pub cover_url: Option<String>,
    pub file_path: String,
    pub content_type: String,
    pub file_size: i64,
}

/// Partial track update
#[derive(Debug, Clone, Default)]
pub struct UpdateTrackData {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub album_id: Option<AlbumId>,
    pub cover_url: Option<String>,
}

/// Limits applied to uploaded audio
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl UploadPolicy {
    /// Whether `content_type` is accepted. Parameters such as `; charset=` are ignored.
    #[must_use]
    pub fn allows(&self, content_type: &str) -> bool {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(essence))
    }
}

/// File extension used for a stored blob of the given content type
#[must_use]
pub fn audio_extension(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" | "audio/mpeg3" | "audio/x-mpeg-3" => "mp3",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/ogg" | "application/ogg" => "ogg",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/aac" => "aac",
        "audio/mp4" | "audio/x-m4a" => "m4a",
        _ => "bin",
    }
}

/// Validate and trim a track title
pub fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = non_blank("title", title)?;
    check_length("title", &title, 1, TRACK_TITLE_MAX_CHARS)?;
    Ok(title)
}

/// Validate and trim an artist name
pub fn normalize_artist(artist: &str) -> Result<String, DomainError> {
    let artist = non_blank("artist_name", artist)?;
    check_length("artist_name", &artist, 1, TRACK_ARTIST_MAX_CHARS)?;
    Ok(artist)
}

fn validate_duration(duration_secs: i32) -> Result<i32, DomainError> {
    if duration_secs < 0 {
        return Err(DomainError::Validation(
            "duration cannot be negative".to_string(),
        ));
    }
    Ok(duration_secs)
}

/// Track domain entity
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    title: String,
    artist_name: String,
    duration_secs: i32,
    file_path: String,
    content_type: String,
    file_size: i64,
    album_id: Option<AlbumId>,
    cover_url: Option<String>,
    added_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    play_count: i64,
}

impl Track {
    /// Create a track for a blob that has already been stored under `id`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when title, artist or duration is invalid.
    pub fn new(id: TrackId, data: NewTrack) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id,
            title: normalize_title(&data.title)?,
            artist_name: normalize_artist(&data.artist_name)?,
            duration_secs: validate_duration(data.duration_secs)?,
            file_path: data.file_path,
            content_type: data.content_type,
            file_size: data.file_size,
            album_id: data.album_id,
            cover_url: data.cover_url,
            added_at: now,
            updated_at: now,
            play_count: 0,
        })
    }

    /// Restore a Track from persisted data
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: TrackId,
        title: String,
        artist_name: String,
        duration_secs: i32,
        file_path: String,
        content_type: String,
        file_size: i64,
        album_id: Option<AlbumId>,
        cover_url: Option<String>,
        added_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        play_count: i64,
    ) -> Self {
        Self {
            id,
            title,
            artist_name,
            duration_secs,
            file_path,
            content_type,
            file_size,
            album_id,
            cover_url,
            added_at,
            updated_at,
            play_count,
        }
    }

    /// Apply a partial update, returning a new instance
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when a supplied field is invalid.
    pub fn with_updates(self, data: UpdateTrackData) -> Result<Self, DomainError> {
        Ok(Self {
            title: data.title.as_deref().map(normalize_title).transpose()?.unwrap_or(self.title),
            artist_name: data
                .artist_name
                .as_deref()
                .map(normalize_artist)
                .transpose()?
                .unwrap_or(self.artist_name),
            album_id: data.album_id.or(self.album_id),
            cover_url: data.cover_url.or(self.cover_url),
            updated_at: Utc::now(),
            ..self
        })
    }

    #[must_use]
    pub fn id(&self) -> &TrackId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    #[must_use]
    pub fn duration_secs(&self) -> i32 {
        self.duration_secs
    }

    /// Blob location relative to the storage root
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    #[must_use]
    pub fn album_id(&self) -> Option<&AlbumId> {
        self.album_id.as_ref()
    }

    #[must_use]
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    #[must_use]
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Number of recorded playbacks
    #[must_use]
    pub fn play_count(&self) -> i64 {
        self.play_count
    }
}

/// A track with its album and genres
#[derive(Debug, Clone)]
pub struct TrackDetails {
    pub track: Track,
    pub album: Option<Album>,
    pub genres: Vec<Genre>,
}
