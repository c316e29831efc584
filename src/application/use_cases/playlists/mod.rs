//! Playlist Use Cases

mod create_playlist;
mod get_playlist;
mod list_user_playlists;
mod manage_playlist;

pub use create_playlist::CreatePlaylistUseCase;
pub use get_playlist::{GetPlaylistTracksUseCase, GetPlaylistUseCase};
pub use list_user_playlists::ListUserPlaylistsUseCase;
pub use manage_playlist::{
    AddTrackToPlaylistUseCase, DeletePlaylistUseCase, RemoveTrackFromPlaylistUseCase, UpdatePlaylistUseCase,
};
