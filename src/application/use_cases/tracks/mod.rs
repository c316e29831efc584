//! Track Use Cases
//!
//! Upload, search, metadata maintenance and blob access for catalog tracks.

mod delete_track;
mod get_track_details;
mod get_track_file;
mod search_tracks;
mod update_track;
mod upload_track;

pub use delete_track::DeleteTrackUseCase;
pub use get_track_details::GetTrackDetailsUseCase;
pub use get_track_file::GetTrackFileUseCase;
pub use search_tracks::SearchTracksUseCase;
pub use update_track::UpdateTrackUseCase;
pub use upload_track::UploadTrackUseCase;
