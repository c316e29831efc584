//! Track DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::album::AlbumSummaryDto;
use super::genre::GenreResponseDto;
use super::validate_cover_url;
use crate::domain::models::{AlbumId, Track, TrackDetails, UpdateTrackData, UploadTrackData};
use crate::shared::errors::{ApiError, UseCaseError};

/// Query string of the search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTracksQuery {
    #[serde(default)]
    pub q: String,
}

/// DTO for partial track update (PATCH)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrackDto {
    #[validate(length(min = 1, max = 100, message = "title must be between 1 and 100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "artist_name must be between 1 and 100 characters"))]
    pub artist_name: Option<String>,

    pub album_id: Option<Uuid>,

    #[validate(custom(function = "validate_cover_url"))]
    pub cover_url: Option<String>,
}

impl From<UpdateTrackDto> for UpdateTrackData {
    fn from(dto: UpdateTrackDto) -> Self {
        Self {
            title: dto.title,
            artist_name: dto.artist_name,
            album_id: dto.album_id.map(AlbumId::from_uuid),
            cover_url: dto.cover_url,
        }
    }
}

/// Audio part of a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart fields of a track upload, collected before validation
#[derive(Debug, Clone, Default)]
pub struct UploadTrackForm {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub album_id: Option<String>,
    pub duration: Option<String>,
    pub cover_url: Option<String>,
    pub file: Option<UploadedFile>,
}

impl UploadTrackForm {
    /// Check presence and format of every field, reporting all problems at once
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each missing or malformed field.
    pub fn into_upload_data(self) -> Result<UploadTrackData, ApiError> {
        let mut errors = Vec::new();

        let title = non_empty(self.title);
        if title.is_none() {
            errors.push("title: title is required".to_string());
        }
        let artist_name = non_empty(self.artist_name);
        if artist_name.is_none() {
            errors.push("artist_name: artist_name is required".to_string());
        }

        let album_id = match non_empty(self.album_id).map(|raw| Uuid::parse_str(&raw)) {
            Some(Ok(id)) => Some(AlbumId::from_uuid(id)),
            Some(Err(_)) => {
                errors.push("album_id: album_id must be a UUID".to_string());
                None
            }
            None => {
                errors.push("album_id: album_id is required".to_string());
                None
            }
        };

        let duration_secs = match non_empty(self.duration).map(|raw| raw.parse::<i32>()) {
            Some(Ok(secs)) if secs >= 0 => secs,
            Some(_) => {
                errors.push("duration: duration must be a non-negative number of seconds".to_string());
                0
            }
            None => {
                errors.push("duration: duration is required".to_string());
                0
            }
        };

        let cover_url = non_empty(self.cover_url);
        if let Some(Err(e)) = cover_url.as_deref().map(validate_cover_url) {
            errors.push(format!(
                "cover_url: {}",
                e.message.as_deref().unwrap_or("invalid cover_url")
            ));
        }

        let Some(file) = self.file else {
            errors.push("file: audio file is required".to_string());
            return Err(UseCaseError::Validation(errors).into());
        };

        match (title, artist_name) {
            (Some(title), Some(artist_name)) if errors.is_empty() => Ok(UploadTrackData {
                title,
                artist_name,
                album_id,
                duration_secs,
                cover_url,
                content_type: file.content_type,
                file_name: file.file_name,
                bytes: file.bytes,
            }),
            _ => Err(UseCaseError::Validation(errors).into()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Track as returned by the API. The blob path stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct TrackResponseDto {
    pub id: Uuid,
    pub title: String,
    pub artist_name: String,
    pub duration: i32,
    pub album_id: Option<Uuid>,
    pub cover_url: Option<String>,
    pub content_type: String,
    pub file_size: i64,
    pub play_count: i64,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Track> for TrackResponseDto {
    fn from(track: Track) -> Self {
        Self {
            id: *track.id().as_uuid(),
            title: track.title().to_string(),
            artist_name: track.artist_name().to_string(),
            duration: track.duration_secs(),
            album_id: track.album_id().map(|id| *id.as_uuid()),
            cover_url: track.cover_url().map(ToString::to_string),
            content_type: track.content_type().to_string(),
            file_size: track.file_size(),
            play_count: track.play_count(),
            added_at: track.added_at(),
            updated_at: track.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackDetailsResponseDto {
    #[serde(flatten)]
    pub track: TrackResponseDto,
    pub album: Option<AlbumSummaryDto>,
    pub genres: Vec<GenreResponseDto>,
}

impl From<TrackDetails> for TrackDetailsResponseDto {
    fn from(details: TrackDetails) -> Self {
        Self {
            track: details.track.into(),
            album: details.album.map(AlbumSummaryDto::from),
            genres: details.genres.into_iter().map(GenreResponseDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> UploadTrackForm {
        UploadTrackForm {
            title: Some(" Blue in Green ".to_string()),
            artist_name: Some("Miles Davis".to_string()),
            album_id: Some(Uuid::new_v4().to_string()),
            duration: Some("337".to_string()),
            cover_url: None,
            file: Some(UploadedFile {
                file_name: Some("blue.mp3".to_string()),
                content_type: "audio/mpeg".to_string(),
                bytes: vec![0xFF, 0xFB],
            }),
        }
    }

    fn validation_messages(err: ApiError) -> Vec<String> {
        match err {
            ApiError::UseCase(UseCaseError::Validation(messages)) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn should_build_upload_data_from_complete_form() {
        let data = complete_form().into_upload_data().unwrap();
        assert_eq!(data.title, "Blue in Green");
        assert_eq!(data.duration_secs, 337);
        assert!(data.album_id.is_some());
        assert_eq!(data.bytes.len(), 2);
    }

    #[test]
    fn should_report_every_missing_field() {
        let messages = validation_messages(UploadTrackForm::default().into_upload_data().unwrap_err());
        assert_eq!(messages.len(), 5);
        assert!(messages.iter().any(|m| m.starts_with("file:")));
    }

    #[test]
    fn should_reject_malformed_album_id_and_duration() {
        let form = UploadTrackForm {
            album_id: Some("not-a-uuid".to_string()),
            duration: Some("-4".to_string()),
            ..complete_form()
        };
        let messages = validation_messages(form.into_upload_data().unwrap_err());
        assert!(messages.iter().any(|m| m.starts_with("album_id:")));
        assert!(messages.iter().any(|m| m.starts_with("duration:")));
    }

    #[test]
    fn should_validate_cover_url_on_upload() {
        let form = UploadTrackForm {
            cover_url: Some("cover.png".to_string()),
            ..complete_form()
        };
        assert!(form.into_upload_data().is_err());
    }

    #[test]
    fn should_validate_update_fields_when_present() {
        assert!(UpdateTrackDto::default().validate().is_ok());
        let dto = UpdateTrackDto {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
