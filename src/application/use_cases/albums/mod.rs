//! Album Use Cases

mod add_track_to_album;
mod create_album;
mod delete_album;
mod get_album_details;
mod list_albums;
pub(crate) mod membership;
mod remove_track_from_album;
mod update_album;

pub use add_track_to_album::AddTrackToAlbumUseCase;
pub use create_album::CreateAlbumUseCase;
pub use delete_album::DeleteAlbumUseCase;
pub use get_album_details::GetAlbumDetailsUseCase;
pub use list_albums::ListAlbumsUseCase;
pub use remove_track_from_album::RemoveTrackFromAlbumUseCase;
pub use update_album::UpdateAlbumUseCase;
