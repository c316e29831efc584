//! Playlist Domain Model
//!
//! User-owned, ordered collections of tracks.

use chrono::{DateTime, Utc};

use super::ids::{PlaylistId, UserId};
use super::rules::{check_length, PLAYLIST_DESCRIPTION_MAX_CHARS, PLAYLIST_NAME_MAX_CHARS, PLAYLIST_NAME_MIN_CHARS};
use super::track::Track;
use crate::shared::errors::DomainError;

/// Data required to create a new Playlist
#[derive(Debug, Clone)]
pub struct CreatePlaylistData {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub cover_url: Option<String>,
}

/// Partial playlist update
#[derive(Debug, Clone, Default)]
pub struct UpdatePlaylistData {
    pub name: Option<String>,
    pub description: Option<String>,
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    check_length("name", name, PLAYLIST_NAME_MIN_CHARS, PLAYLIST_NAME_MAX_CHARS)?;
    Ok(name.to_string())
}

fn validate_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    check_length("description", description, 0, PLAYLIST_DESCRIPTION_MAX_CHARS)?;
    Ok(description.to_string())
}

/// Playlist domain entity
#[derive(Debug, Clone)]
pub struct Playlist {
    id: PlaylistId,
    owner_id: UserId,
    name: String,
    description: String,
    cover_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new Playlist
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name or description length is out of range.
    pub fn new(data: CreatePlaylistData) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: PlaylistId::new(),
            owner_id: data.owner_id,
            name: validate_name(&data.name)?,
            description: validate_description(&data.description)?,
            cover_url: data.cover_url,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub fn restore(
        id: PlaylistId,
        owner_id: UserId,
        name: String,
        description: String,
        cover_url: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            description,
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
    pub fn with_updates(self, data: UpdatePlaylistData) -> Result<Self, DomainError> {
        Ok(Self {
            name: data.name.as_deref().map(validate_name).transpose()?.unwrap_or(self.name),
            description: data
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?
                .unwrap_or(self.description),
            updated_at: Utc::now(),
            ..self
        })
    }

    /// Mark the playlist as modified after a track was added or removed
    #[must_use]
    pub fn touch(self) -> Self {
        Self {
            updated_at: Utc::now(),
            ..self
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    #[must_use]
    pub fn id(&self) -> &PlaylistId {
        &self.id
    }

    #[must_use]
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
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

/// A playlist with its tracks, most recently added first
#[derive(Debug, Clone)]
pub struct PlaylistWithTracks {
    pub playlist: Playlist,
    pub tracks: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist_data() -> CreatePlaylistData {
        CreatePlaylistData {
            owner_id: UserId::new(),
            name: "Late night".to_string(),
            description: String::new(),
            cover_url: None,
        }
    }

    #[test]
    fn should_create_playlist_owned_by_user() {
        let data = playlist_data();
        let owner = data.owner_id;
        let playlist = Playlist::new(data).unwrap();
        assert!(playlist.is_owned_by(&owner));
        assert!(!playlist.is_owned_by(&UserId::new()));
    }

    #[test]
    fn should_reject_long_description() {
        let data = CreatePlaylistData {
            description: "d".repeat(501),
            ..playlist_data()
        };
        assert!(Playlist::new(data).is_err());
    }

    #[test]
    fn should_rename_and_keep_description() {
        let playlist = Playlist::new(CreatePlaylistData {
            description: "for coding".to_string(),
            ..playlist_data()
        })
        .unwrap();
        let renamed = playlist
            .with_updates(UpdatePlaylistData {
                name: Some("Deep focus".to_string()),
                description: None,
            })
            .unwrap();
        assert_eq!(renamed.name(), "Deep focus");
        assert_eq!(renamed.description(), "for coding");
    }
}
