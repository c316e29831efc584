//! Catalog rules
//!
//! Limits shared by the domain models and the use cases that enforce them.

use crate::shared::errors::DomainError;

pub const LOGIN_MIN_CHARS: usize = 6;
pub const LOGIN_MAX_CHARS: usize = 64;
pub const PASSWORD_MIN_CHARS: usize = 8;
/// bcrypt silently ignores everything past 72 bytes
pub const PASSWORD_MAX_BYTES: usize = 72;

pub const ALBUM_TITLE_MIN_CHARS: usize = 2;
pub const ALBUM_TITLE_MAX_CHARS: usize = 100;
pub const ALBUM_ARTIST_MAX_CHARS: usize = 100;
pub const ALBUM_MAX_TRACKS: usize = 50;

pub const TRACK_TITLE_MAX_CHARS: usize = 100;
pub const TRACK_ARTIST_MAX_CHARS: usize = 100;
pub const TRACK_MAX_GENRES: usize = 5;
pub const SEARCH_QUERY_MIN_CHARS: usize = 3;
pub const SEARCH_MAX_RESULTS: i64 = 100;

pub const GENRE_NAME_MIN_CHARS: usize = 2;
pub const GENRE_NAME_MAX_CHARS: usize = 50;

pub const PLAYLIST_NAME_MIN_CHARS: usize = 2;
pub const PLAYLIST_NAME_MAX_CHARS: usize = 100;
pub const PLAYLIST_DESCRIPTION_MAX_CHARS: usize = 500;
pub const PLAYLIST_MAX_TRACKS: usize = 1000;

pub const PLAYBACK_MIN_DURATION_SECS: i32 = 30;
pub const PLAYBACK_THROTTLE_WINDOW_SECS: i64 = 5 * 60;
pub const PLAYBACK_THROTTLE_MAX_PLAYS: i64 = 3;
pub const HISTORY_MAX_ENTRIES: i64 = 100;
pub const RECENT_PLAYS_DEFAULT_HOURS: i64 = 24;
pub const RECENT_PLAYS_MAX_HOURS: i64 = 720;

/// Check that `value` has between `min` and `max` characters (not bytes)
pub(crate) fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min {
        return Err(DomainError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} is too long (max {max} characters)"
        )));
    }
    Ok(())
}

/// Trim `value` and reject it when nothing is left
pub(crate) fn non_blank(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_characters_not_bytes() {
        // four Cyrillic letters are eight bytes
        assert!(check_length("title", "Рок!", 2, 4).is_ok());
        assert!(check_length("title", "Рок!!", 2, 4).is_err());
        assert!(check_length("title", "Р", 2, 4).is_err());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("name", "  Jazz ").unwrap(), "Jazz");
        assert!(non_blank("name", "   ").is_err());
    }
}
