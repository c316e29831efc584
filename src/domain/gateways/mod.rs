//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod album_repository;
pub mod audio_storage;
pub mod genre_repository;
pub mod history_repository;
pub mod password_hasher;
pub mod playlist_repository;
pub mod track_repository;
pub mod user_repository;

pub use album_repository::AlbumRepository;
pub use audio_storage::AudioStorage;
pub use genre_repository::GenreRepository;
pub use history_repository::HistoryRepository;
pub use password_hasher::PasswordHasher;
pub use playlist_repository::PlaylistRepository;
pub use track_repository::TrackRepository;
pub use user_repository::{SessionRepository, UserRepository};

#[cfg(test)]
pub use album_repository::MockAlbumRepository;
#[cfg(test)]
pub use audio_storage::MockAudioStorage;
#[cfg(test)]
pub use genre_repository::MockGenreRepository;
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use playlist_repository::MockPlaylistRepository;
#[cfg(test)]
pub use track_repository::MockTrackRepository;
#[cfg(test)]
pub use user_repository::{MockSessionRepository, MockUserRepository};
