//! Get Track Genres Use Case

use std::sync::Arc;

use crate::domain::gateways::{GenreRepository, TrackRepository};
use crate::domain::models::{Genre, TrackId};
use crate::shared::errors::UseCaseError;

pub struct GetTrackGenresUseCase {
    genre_repository: Arc<dyn GenreRepository>,
    track_repository: Arc<dyn TrackRepository>,
}

impl GetTrackGenresUseCase {
    #[must_use]
    pub fn new(genre_repository: Arc<dyn GenreRepository>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            genre_repository,
            track_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track doesn't exist.
    pub async fn execute(&self, track_id: &TrackId) -> Result<Vec<Genre>, UseCaseError> {
        if self.track_repository.find_by_id(track_id).await?.is_none() {
            return Err(UseCaseError::not_found("Track", track_id));
        }
        Ok(self.genre_repository.find_by_track(track_id).await?)
    }
}
