//! Playlist DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::track::TrackResponseDto;
use super::validate_cover_url;
use crate::domain::models::{CreatePlaylistData, Playlist, PlaylistWithTracks, UpdatePlaylistData, UserId};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlaylistDto {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,

    #[validate(custom(function = "validate_cover_url"))]
    pub cover_url: Option<String>,
}

impl CreatePlaylistDto {
    #[must_use]
    pub fn into_data(self, owner_id: UserId) -> CreatePlaylistData {
        CreatePlaylistData {
            owner_id,
            name: self.name,
            description: self.description,
            cover_url: self.cover_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlaylistDto {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl From<UpdatePlaylistDto> for UpdatePlaylistData {
    fn from(dto: UpdatePlaylistDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistDto {
    pub track_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistResponseDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Playlist> for PlaylistResponseDto {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: *playlist.id().as_uuid(),
            owner_id: *playlist.owner_id().as_uuid(),
            name: playlist.name().to_string(),
            description: playlist.description().to_string(),
            cover_url: playlist.cover_url().map(ToString::to_string),
            created_at: playlist.created_at(),
            updated_at: playlist.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetailsResponseDto {
    #[serde(flatten)]
    pub playlist: PlaylistResponseDto,
    pub tracks: Vec<TrackResponseDto>,
}

impl From<PlaylistWithTracks> for PlaylistDetailsResponseDto {
    fn from(value: PlaylistWithTracks) -> Self {
        Self {
            playlist: value.playlist.into(),
            tracks: value.tracks.into_iter().map(TrackResponseDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_defaults_to_empty() {
        let dto: CreatePlaylistDto = serde_json::from_str(r#"{"name":"Road trip"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.description, "");
    }

    #[test]
    fn overlong_description_is_rejected() {
        let dto = UpdatePlaylistDto {
            description: Some("x".repeat(501)),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
