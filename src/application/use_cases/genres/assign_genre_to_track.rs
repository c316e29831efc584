//! Assign Genre To Track Use Case

use std::sync::Arc;

use crate::domain::gateways::{GenreRepository, TrackRepository};
use crate::domain::models::rules::TRACK_MAX_GENRES;
use crate::domain::models::{GenreId, TrackId};
use crate::shared::errors::{DomainError, UseCaseError};

pub struct AssignGenreToTrackUseCase {
    genre_repository: Arc<dyn GenreRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl AssignGenreToTrackUseCase {
    #[must_use]
    pub fn new(genre_repository: Arc<dyn GenreRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            genre_repository,
            track_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track or genre doesn't exist.
    /// Returns `UseCaseError::Conflict` if the genre is already assigned.
    /// Returns `UseCaseError::Domain` with `LimitExceeded` once a track has 5 genres.
    pub async fn execute(&self, track_id: &TrackId, genre_id: &GenreId) -> Result<(), UseCaseError> {
        if self.track_repository.find_by_id(track_id).await?.is_none() {
            return Err(UseCaseError::not_found("Track", track_id));
        }
        if self.genre_repository.find_by_id(genre_id).await?.is_none() {
            return Err(UseCaseError::not_found("Genre", genre_id));
        }

        if self.genre_repository.is_assigned(track_id, genre_id).await? {
            return Err(UseCaseError::Conflict("genre is already assigned to this track".to_string()));
        }
        let too_many = || -> UseCaseError {
            DomainError::LimitExceeded(format!("a track can have at most {TRACK_MAX_GENRES} genres")).into()
        };
        if self.genre_repository.count_by_track(track_id).await? >= TRACK_MAX_GENRES as i64 {
            tracing::warn!(track_id = %track_id, "Track genre limit reached");
            return Err(too_many());
        }
        if !self
            .genre_repository
            .assign(track_id, genre_id, TRACK_MAX_GENRES as i64)
            .await?
        {
            tracing::warn!(track_id = %track_id, "Track genre limit reached concurrently");
            return Err(too_many());
        }
        tracing::info!(track_id = %track_id, genre_id = %genre_id, "Genre assigned to track");
        Ok(())
    }
}
