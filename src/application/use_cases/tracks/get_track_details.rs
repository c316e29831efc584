//! Get Track Details Use Case
//!
//! Loads a track with its album and genres. Failures loading the album or
//! the genres degrade the response instead of failing it.

use std::sync::Arc;

use crate::domain::gateways::{AlbumRepository, GenreRepository, TrackRepository};
use crate::domain::models::{TrackDetails, TrackId};
use crate::shared::errors::UseCaseError;

pub struct GetTrackDetailsUseCase {
    track_repository: Arc<dyn TrackRepository>,
    album_repository: Arc<dyn AlbumRepository>,
    genre_repository: Arc<dyn GenreRepository>,
}

impl GetTrackDetailsUseCase {
    #[must_use]
    pub fn new(
        track_repository: Arc<dyn TrackRepository>,
        album_repository: Arc<dyn AlbumRepository>,
        genre_repository: Arc<dyn GenreRepository>,
    ) -> Self {
        Self {
            track_repository,
            album_repository,
            genre_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the track doesn't exist.
    pub async fn execute(&self, id: &TrackId) -> Result<TrackDetails, UseCaseError> {
        tracing::debug!(track_id = %id, "Fetching track details");

        let track = self
            .track_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::not_found("Track", id))?;

        let album = match track.album_id() {
            Some(album_id) => match self.album_repository.find_by_id(album_id).await {
                Ok(Some(album)) => Some(album),
                Ok(None) => {
                    tracing::warn!(track_id = %id, album_id = %album_id, "Track references a missing album");
                    None
                }
                Err(e) => {
                    tracing::error!(track_id = %id, error = %e, "Failed to load album of track");
                    None
                }
            },
            None => None,
        };

        let genres = self.genre_repository.find_by_track(id).await.unwrap_or_else(|e| {
            tracing::error!(track_id = %id, error = %e, "Failed to load genres of track");
            Vec::new()
        });

        Ok(TrackDetails { track, album, genres })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockAlbumRepository, MockGenreRepository, MockTrackRepository};
    use crate::domain::models::AlbumId;
    use crate::shared::errors::RepositoryError;

    #[tokio::test]
    async fn should_degrade_when_album_missing_and_genres_fail() {
        let track = test_support::track(Some(AlbumId::new()), 200);
        let id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().returning(|_| Ok(None));
        let mut genres = MockGenreRepository::new();
        genres
            .expect_find_by_track()
            .returning(|_| Err(RepositoryError::Mapping("bad row".to_string())));

        let details = GetTrackDetailsUseCase::new(Arc::new(tracks), Arc::new(albums), Arc::new(genres))
            .execute(&id)
            .await
            .unwrap();

        assert!(details.album.is_none());
        assert!(details.genres.is_empty());
    }

    #[tokio::test]
    async fn should_include_album_and_genres() {
        let album = test_support::album();
        let track = test_support::track(Some(*album.id()), 200);
        let id = *track.id();
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().return_once(move |_| Ok(Some(track)));
        let mut albums = MockAlbumRepository::new();
        albums.expect_find_by_id().return_once(move |_| Ok(Some(album)));
        let mut genres = MockGenreRepository::new();
        genres
            .expect_find_by_track()
            .returning(|_| Ok(vec![test_support::genre("Jazz")]));

        let details = GetTrackDetailsUseCase::new(Arc::new(tracks), Arc::new(albums), Arc::new(genres))
            .execute(&id)
            .await
            .unwrap();

        assert_eq!(details.album.map(|a| a.title().to_string()).as_deref(), Some("Kind of Blue"));
        assert_eq!(details.genres.len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_track() {
        let mut tracks = MockTrackRepository::new();
        tracks.expect_find_by_id().returning(|_| Ok(None));

        let result = GetTrackDetailsUseCase::new(
            Arc::new(tracks),
            Arc::new(MockAlbumRepository::new()),
            Arc::new(MockGenreRepository::new()),
        )
        .execute(&TrackId::new())
        .await;

        assert!(matches!(result, Err(UseCaseError::NotFound { .. })));
    }
}
