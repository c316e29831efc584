//! List User Playlists Use Case

use std::sync::Arc;

use crate::domain::gateways::{PlaylistRepository, UserRepository};
use crate::domain::models::{Playlist, UserId};
use crate::shared::errors::UseCaseError;

pub struct ListUserPlaylistsUseCase {
    playlist_repository: Arc<dyn PlaylistRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ListUserPlaylistsUseCase {
    #[must_use]
    pub fn new(playlist_repository: Arc<dyn PlaylistRepository>, user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            playlist_repository,
            user_repository,
        }
    }

    /// Playlists of a user, newest first
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the user doesn't exist.
    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<Playlist>, UseCaseError> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(UseCaseError::not_found("User", user_id));
        }
        Ok(self.playlist_repository.find_by_owner(user_id).await?)
    }
}
