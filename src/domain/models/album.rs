//! Album Domain Model

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::ids::AlbumId;
use super::rules::{check_length, non_blank, ALBUM_ARTIST_MAX_CHARS, ALBUM_TITLE_MAX_CHARS, ALBUM_TITLE_MIN_CHARS};
use super::track::Track;
use crate::shared::errors::DomainError;

/// Data required to create a new Album
#[derive(Debug, Clone)]
pub struct CreateAlbumData {
    pub title: String,
    pub artist: String,
    pub release_date: NaiveDate,
    pub cover_url: Option<String>,
}

/// Partial album update
#[derive(Debug, Clone, Default)]
pub struct UpdateAlbumData {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub cover_url: Option<String>,
}

/// Album domain entity
#[derive(Debug, Clone)]
pub struct Album {
    id: AlbumId,
    title: String,
    artist: String,
    release_date: NaiveDate,
    cover_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    check_length("title", title, ALBUM_TITLE_MIN_CHARS, ALBUM_TITLE_MAX_CHARS)?;
    Ok(title.to_string())
}

fn validate_artist(artist: &str) -> Result<String, DomainError> {
    let artist = non_blank("artist", artist)?;
    check_length("artist", &artist, 1, ALBUM_ARTIST_MAX_CHARS)?;
    Ok(artist)
}

/// Release dates may be at most one day ahead to absorb timezone skew
fn validate_release_date(date: NaiveDate, now: DateTime<Utc>) -> Result<NaiveDate, DomainError> {
    let latest = (now + Duration::hours(24)).date_naive();
    if date > latest {
        return Err(DomainError::Validation(
            "release date cannot be in the future".to_string(),
        ));
    }
    Ok(date)
}

impl Album {
    /// Create a new Album, validating its fields
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the title, artist or release date is invalid.
    pub fn new(data: CreateAlbumData) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: AlbumId::new(),
            title: validate_title(&data.title)?,
            artist: validate_artist(&data.artist)?,
            release_date: validate_release_date(data.release_date, now)?,
            cover_url: data.cover_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Restore an Album from persisted data
    #[must_use]
    pub fn restore(
        id: AlbumId,
        title: String,
        artist: String,
        release_date: NaiveDate,
        cover_url: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            artist,
            release_date,
            cover_url,
            created_at,
            updated_at,
        }
    }

    /// Apply a partial update, returning a new instance
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when a supplied field is invalid.
    pub fn with_updates(self, data: UpdateAlbumData) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: self.id,
            title: data.title.as_deref().map(validate_title).transpose()?.unwrap_or(self.title),
            artist: data.artist.as_deref().map(validate_artist).transpose()?.unwrap_or(self.artist),
            release_date: data
                .release_date
                .map(|d| validate_release_date(d, now))
                .transpose()?
                .unwrap_or(self.release_date),
            cover_url: data.cover_url.or(self.cover_url),
            created_at: self.created_at,
            updated_at: now,
        })
    }

    /// Mark the album as modified, e.g. after a membership change
    #[must_use]
    pub fn touch(self) -> Self {
        Self {
            updated_at: Utc::now(),
            ..self
        }
    }

    #[must_use]
    pub fn id(&self) -> &AlbumId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    #[must_use]
    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    #[must_use]
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// An album together with its tracks
#[derive(Debug, Clone)]
pub struct AlbumWithTracks {
    pub album: Album,
    pub tracks: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album_data() -> CreateAlbumData {
        CreateAlbumData {
            title: "  Kind of Blue ".to_string(),
            artist: "Miles Davis".to_string(),
            release_date: NaiveDate::from_ymd_opt(1959, 8, 17).unwrap(),
            cover_url: None,
        }
    }

    #[test]
    fn should_trim_title_on_create() {
        let album = Album::new(album_data()).unwrap();
        assert_eq!(album.title(), "Kind of Blue");
        assert_eq!(album.artist(), "Miles Davis");
    }

    #[test]
    fn should_reject_short_title() {
        let data = CreateAlbumData {
            title: " K ".to_string(),
            ..album_data()
        };
        assert!(matches!(Album::new(data), Err(DomainError::Validation(_))));
    }

    #[test]
    fn should_accept_release_tomorrow_but_not_later() {
        let tomorrow = (Utc::now() + Duration::hours(24)).date_naive();
        let ok = CreateAlbumData {
            release_date: tomorrow,
            ..album_data()
        };
        assert!(Album::new(ok).is_ok());

        let later = CreateAlbumData {
            release_date: tomorrow + Duration::days(2),
            ..album_data()
        };
        assert!(Album::new(later).is_err());
    }

    #[test]
    fn should_apply_partial_updates() {
        let album = Album::new(album_data()).unwrap();
        let updated = album
            .with_updates(UpdateAlbumData {
                title: Some("Sketches of Spain".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.title(), "Sketches of Spain");
        assert_eq!(updated.artist(), "Miles Davis");
    }

    #[test]
    fn should_validate_updated_fields() {
        let album = Album::new(album_data()).unwrap();
        let result = album.with_updates(UpdateAlbumData {
            artist: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
