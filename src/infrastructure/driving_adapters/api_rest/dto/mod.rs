//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod album;
pub mod genre;
pub mod history;
pub mod playlist;
pub mod track;
pub mod user;

use lazy_static::lazy_static;
use regex::Regex;

pub use album::{AddTrackToAlbumDto, AlbumDetailsResponseDto, AlbumResponseDto, CreateAlbumDto, UpdateAlbumDto};
pub use genre::{AssignGenreDto, CreateGenreDto, GenreResponseDto};
pub use history::{HistoryEntryResponseDto, RecentPlaysQuery};
pub use playlist::{
    AddTrackToPlaylistDto, CreatePlaylistDto, PlaylistDetailsResponseDto, PlaylistResponseDto, UpdatePlaylistDto,
};
pub use track::{SearchTracksQuery, TrackDetailsResponseDto, TrackResponseDto, UpdateTrackDto, UploadTrackForm};
pub use user::{AuthResponseDto, CredentialsDto, SessionResponseDto, UpdatePermissionDto, UserResponseDto};

lazy_static! {
    /// Absolute http(s) URL with a host, or an absolute path served by the frontend
    static ref COVER_URL_REGEX: Regex =
        Regex::new(r"^(https?://[^/\s]+(/\S*)?|/\S*)$").expect("valid regex");
}

/// Maximum accepted length of a cover URL
const COVER_URL_MAX_CHARS: usize = 500;

/// Validates a cover image reference
pub(crate) fn validate_cover_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.chars().count() > COVER_URL_MAX_CHARS {
        let mut error = validator::ValidationError::new("cover_url_length");
        error.message = Some(format!("cover_url must be at most {COVER_URL_MAX_CHARS} characters").into());
        return Err(error);
    }
    if !COVER_URL_REGEX.is_match(url) {
        let mut error = validator::ValidationError::new("cover_url");
        error.message = Some("cover_url must be an http(s) URL or an absolute path".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_url_accepts_http_urls_and_absolute_paths() {
        assert!(validate_cover_url("https://cdn.example.com/covers/1.jpg").is_ok());
        assert!(validate_cover_url("http://localhost:8080/a.png").is_ok());
        assert!(validate_cover_url("/static/covers/a.png").is_ok());
    }

    #[test]
    fn cover_url_rejects_relative_and_other_schemes() {
        assert!(validate_cover_url("covers/a.png").is_err());
        assert!(validate_cover_url("ftp://example.com/a.png").is_err());
        assert!(validate_cover_url("https://").is_err());
        assert!(validate_cover_url("javascript:alert(1)").is_err());
    }
}
