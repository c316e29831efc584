//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod album;
pub mod genre;
pub mod history;
pub mod ids;
pub mod playlist;
pub mod rules;
pub mod track;
pub mod user;

pub use album::{Album, AlbumWithTracks, CreateAlbumData, UpdateAlbumData};
pub use genre::Genre;
pub use history::{HistoryEntry, ListenedTrack, NewPlayback};
pub use ids::{AlbumId, GenreId, HistoryEntryId, PlaylistId, SessionId, TrackId, UserId};
pub use playlist::{CreatePlaylistData, Playlist, PlaylistWithTracks, UpdatePlaylistData};
pub use track::{NewTrack, Track, TrackDetails, UpdateTrackData, UploadPolicy, UploadTrackData};
pub use user::{CurrentUser, Permission, Session, User};
