//! Create Playlist Use Case

use std::sync::Arc;

use crate::domain::gateways::{PlaylistRepository, UserRepository};
use crate::domain::models::{CreatePlaylistData, Playlist};
use crate::shared::errors::UseCaseError;

pub struct CreatePlaylistUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl CreatePlaylistUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>, user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            playlist_repository,
            user_repository,
        }
    }

    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the owner doesn't exist.
    /// Returns `UseCaseError::Domain` if the name or description is out of range.
    pub async fn execute(&self, data: CreatePlaylistData) -> Result<Playlist, UseCaseError> {
        let playlist = Playlist::new(data)?;

        if self.user_repository.find_by_id(playlist.owner_id()).await?.is_none() {
            return Err(UseCaseError::not_found("User", playlist.owner_id()));
        }

        let created = self.playlist_repository.create(&playlist).await?;
        tracing::info!(playlist_id = %created.id(), user_id = %created.owner_id(), "Playlist created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support;
    use crate::domain::gateways::{MockPlaylistRepository, MockUserRepository};
    use crate::domain::models::{Permission, UserId};

    fn data(owner_id: UserId, name: &str) -> CreatePlaylistData {
        CreatePlaylistData {
            owner_id,
            name: name.to_string(),
            description: "evening mix".to_string(),
            cover_url: None,
        }
    }

    #[tokio::test]
    async fn should_create_playlist_for_existing_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(Some(test_support::user(Permission::User))));
        let mut playlists = MockPlaylistRepository::new();
        playlists.expect_create().returning(|p| Ok(p.clone()));

        let playlist = CreatePlaylistUseCase::new(Arc::new(playlists), Arc::new(users))
            .execute(data(UserId::new(), "Evening"))
            .await
            .unwrap();
        assert_eq!(playlist.name(), "Evening");
    }

    #[tokio::test]
    async fn should_reject_one_letter_name() {
        let result = CreatePlaylistUseCase::new(
            Arc::new(MockPlaylistRepository::new()),
            Arc::new(MockUserRepository::new()),
        )
        .execute(data(UserId::new(), "E"))
        .await;
        assert!(matches!(result, Err(UseCaseError::Domain(_))));
    }
}
