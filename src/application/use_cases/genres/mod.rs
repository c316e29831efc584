//! Genre Use Cases

mod assign_genre_to_track;
mod create_genre;
mod delete_genre;
mod get_track_genres;
mod list_genres;
mod remove_genre_from_track;

pub use assign_genre_to_track::AssignGenreToTrackUseCase;
pub use create_genre::CreateGenreUseCase;
pub use delete_genre::DeleteGenreUseCase;
pub use get_track_genres::GetTrackGenresUseCase;
pub use list_genres::ListGenresUseCase;
pub use remove_genre_from_track::RemoveGenreFromTrackUseCase;
