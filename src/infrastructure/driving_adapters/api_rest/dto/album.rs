//! Album DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::track::TrackResponseDto;
use super::validate_cover_url;
use crate::domain::models::{Album, AlbumWithTracks, CreateAlbumData, UpdateAlbumData};

/// DTO for creating a new album
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAlbumDto {
    #[validate(length(min = 2, max = 100, message = "title must be between 2 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "artist must be between 1 and 100 characters"))]
    pub artist: String,

    pub release_date: NaiveDate,

    #[validate(custom(function = "validate_cover_url"))]
    pub cover_url: Option<String>,
}

impl From<CreateAlbumDto> for CreateAlbumData {
    fn from(dto: CreateAlbumDto) -> Self {
        Self {
            title: dto.title,
            artist: dto.artist,
            release_date: dto.release_date,
            cover_url: dto.cover_url,
        }
    }
}

/// DTO for album update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAlbumDto {
    #[validate(length(min = 2, max = 100, message = "title must be between 2 and 100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "artist must be between 1 and 100 characters"))]
    pub artist: Option<String>,

    pub release_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_cover_url"))]
    pub cover_url: Option<String>,
}

impl From<UpdateAlbumDto> for UpdateAlbumData {
    fn from(dto: UpdateAlbumDto) -> Self {
        Self {
            title: dto.title,
            artist: dto.artist,
            release_date: dto.release_date,
            cover_url: dto.cover_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToAlbumDto {
    pub track_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumResponseDto {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub release_date: NaiveDate,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Album> for AlbumResponseDto {
    fn from(album: Album) -> Self {
        Self {
            id: *album.id().as_uuid(),
            title: album.title().to_string(),
            artist: album.artist().to_string(),
            release_date: album.release_date(),
            cover_url: album.cover_url().map(ToString::to_string),
            created_at: album.created_at(),
            updated_at: album.updated_at(),
        }
    }
}

/// Album reference embedded in track details
#[derive(Debug, Clone, Serialize)]
pub struct AlbumSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub cover_url: Option<String>,
}

impl From<Album> for AlbumSummaryDto {
    fn from(album: Album) -> Self {
        Self {
            id: *album.id().as_uuid(),
            title: album.title().to_string(),
            artist: album.artist().to_string(),
            cover_url: album.cover_url().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumDetailsResponseDto {
    #[serde(flatten)]
    pub album: AlbumResponseDto,
    pub tracks: Vec<TrackResponseDto>,
}

impl From<AlbumWithTracks> for AlbumDetailsResponseDto {
    fn from(value: AlbumWithTracks) -> Self {
        Self {
            album: value.album.into(),
            tracks: value.tracks.into_iter().map(TrackResponseDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_iso_release_date() {
        let dto: CreateAlbumDto = serde_json::from_str(
            r#"{"title":"Kind of Blue","artist":"Miles Davis","release_date":"1959-08-17"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.release_date, NaiveDate::from_ymd_opt(1959, 8, 17).unwrap());
        assert!(dto.cover_url.is_none());
    }

    #[test]
    fn should_reject_one_character_title() {
        let dto = CreateAlbumDto {
            title: "K".to_string(),
            artist: "Miles Davis".to_string(),
            release_date: NaiveDate::from_ymd_opt(1959, 8, 17).unwrap(),
            cover_url: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn should_reject_relative_cover_url_on_update() {
        let dto = UpdateAlbumDto {
            cover_url: Some("covers/kob.jpg".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
