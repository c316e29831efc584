//! Fixtures shared by the use case tests

use chrono::{Duration, NaiveDate, Utc};

use crate::domain::models::{
    Album, AlbumId, Genre, GenreId, Permission, Playlist, PlaylistId, Session, SessionId, Track, TrackId, User,
    UserId,
};

pub fn user(permission: Permission) -> User {
    let now = Utc::now();
    User::restore(UserId::new(), "listener".to_string(), "$2b$hash".to_string(), permission, now, now)
}

pub fn session_for(user_id: UserId, expires_in: Duration) -> Session {
    let now = Utc::now();
    Session::restore(SessionId::new(), user_id, now + expires_in, now)
}

pub fn album() -> Album {
    let now = Utc::now();
    Album::restore(
        AlbumId::new(),
        "Kind of Blue".to_string(),
        "Miles Davis".to_string(),
        NaiveDate::from_ymd_opt(1959, 8, 17).unwrap(),
        None,
        now,
        now,
    )
}

pub fn track(album_id: Option<AlbumId>, duration_secs: i32) -> Track {
    let now = Utc::now();
    let id = TrackId::new();
    Track::restore(
        id,
        "So What".to_string(),
        "Miles Davis".to_string(),
        duration_secs,
        format!("ab/cd/{id}.mp3"),
        "audio/mpeg".to_string(),
        2048,
        album_id,
        None,
        now,
        now,
        0,
    )
}

pub fn genre(name: &str) -> Genre {
    Genre::restore(GenreId::new(), name.to_string())
}

pub fn playlist(owner_id: UserId) -> Playlist {
    let now = Utc::now();
    Playlist::restore(
        PlaylistId::new(),
        owner_id,
        "Late night".to_string(),
        String::new(),
        None,
        now,
        now,
    )
}
