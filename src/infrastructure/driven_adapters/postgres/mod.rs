//! PostgreSQL Repositories
//!
//! `sqlx` implementations of the repository gateways.

mod album_repository;
mod genre_repository;
mod history_repository;
mod playlist_repository;
mod track_repository;
mod user_repository;

pub use album_repository::PostgresAlbumRepository;
pub use genre_repository::PostgresGenreRepository;
pub use history_repository::PostgresHistoryRepository;
pub use playlist_repository::PostgresPlaylistRepository;
pub use track_repository::PostgresTrackRepository;
pub use user_repository::{PostgresSessionRepository, PostgresUserRepository};
