//! Playlist Handlers
//!
//! All endpoints require a session. Only the owner may change a playlist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use validator::Validate;

use super::parse_id;
use crate::domain::models::{PlaylistId, TrackId};
use crate::infrastructure::driving_adapters::api_rest::dto::{
    AddTrackToPlaylistDto, CreatePlaylistDto, PlaylistDetailsResponseDto, PlaylistResponseDto, TrackResponseDto,
    UpdatePlaylistDto,
};
use crate::infrastructure::driving_adapters::api_rest::middleware::AuthUser;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_playlists).post(create_playlist))
        .route("/:id", get(get_playlist).patch(update_playlist).delete(delete_playlist))
        .route("/:id/tracks", get(get_playlist_tracks).post(add_track))
        .route("/:id/tracks/:track_id", delete(remove_track))
}

/// GET /playlists - The caller's playlists, newest first
#[axum::debug_handler]
async fn list_my_playlists(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PlaylistResponseDto>>, ApiError> {
    let playlists = state.playlists.list_for_user.execute(&user.user_id).await?;
    Ok(Json(playlists.into_iter().map(PlaylistResponseDto::from).collect()))
}

/// POST /playlists - Create a playlist owned by the caller
#[axum::debug_handler]
async fn create_playlist(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(dto): Json<CreatePlaylistDto>,
) -> Result<(StatusCode, Json<PlaylistResponseDto>), ApiError> {
    dto.validate()?;

    let playlist = state.playlists.create.execute(dto.into_data(user.user_id)).await?;

    Ok((StatusCode::CREATED, Json(PlaylistResponseDto::from(playlist))))
}

#[axum::debug_handler]
async fn get_playlist(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlaylistDetailsResponseDto>, ApiError> {
    let playlist_id: PlaylistId = parse_id(&id)?;
    let playlist = state.playlists.get.execute(&playlist_id).await?;
    Ok(Json(playlist.into()))
}

#[axum::debug_handler]
async fn get_playlist_tracks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TrackResponseDto>>, ApiError> {
    let playlist_id: PlaylistId = parse_id(&id)?;
    let tracks = state.playlists.tracks.execute(&playlist_id).await?;
    Ok(Json(tracks.into_iter().map(TrackResponseDto::from).collect()))
}

/// PATCH /playlists/:id - Rename or re-describe a playlist
///
/// # Responses
///
/// * 200 OK - Playlist updated
/// * 400 Bad Request - Name or description length out of range
/// * 403 Forbidden - Caller does not own the playlist
/// * 404 Not Found - Playlist does not exist
#[axum::debug_handler]
async fn update_playlist(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdatePlaylistDto>,
) -> Result<Json<PlaylistResponseDto>, ApiError> {
    dto.validate()?;

    let playlist_id: PlaylistId = parse_id(&id)?;
    let playlist = state
        .playlists
        .update
        .execute(&playlist_id, &user.user_id, dto.into())
        .await?;
    Ok(Json(playlist.into()))
}

#[axum::debug_handler]
async fn delete_playlist(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let playlist_id: PlaylistId = parse_id(&id)?;
    state.playlists.delete.execute(&playlist_id, &user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /playlists/:id/tracks - Append a track
///
/// # Responses
///
/// * 204 No Content - Track added
/// * 403 Forbidden - Caller does not own the playlist
/// * 404 Not Found - Playlist or track does not exist
/// * 409 Conflict - Track already in the playlist
/// * 422 Unprocessable Entity - Playlist holds 1000 tracks
#[axum::debug_handler]
async fn add_track(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<AddTrackToPlaylistDto>,
) -> Result<StatusCode, ApiError> {
    let playlist_id: PlaylistId = parse_id(&id)?;
    let track_id = TrackId::from_uuid(dto.track_id);
    state
        .playlists
        .add_track
        .execute(&playlist_id, &user.user_id, &track_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
async fn remove_track(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((id, track_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let playlist_id: PlaylistId = parse_id(&id)?;
    let track_id: TrackId = parse_id(&track_id)?;
    state
        .playlists
        .remove_track
        .execute(&playlist_id, &user.user_id, &track_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
