//! Album Handlers
//!
//! Reads are public; changes require an admin session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use validator::Validate;

use super::parse_id;
use crate::domain::models::{AlbumId, TrackId};
use crate::infrastructure::driving_adapters::api_rest::dto::{
    AddTrackToAlbumDto, AlbumDetailsResponseDto, AlbumResponseDto, CreateAlbumDto, UpdateAlbumDto,
};
use crate::infrastructure::driving_adapters::api_rest::middleware::AdminUser;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_albums).post(create_album))
        .route("/:id", get(get_album).put(update_album).delete(delete_album))
        .route("/:id/tracks", post(add_track_to_album))
        .route("/:id/tracks/:track_id", delete(remove_track_from_album))
}

/// GET /albums - All albums ordered by title
#[axum::debug_handler]
async fn list_albums(State(state): State<AppState>) -> Result<Json<Vec<AlbumResponseDto>>, ApiError> {
    let albums = state.albums.list.execute().await?;
    Ok(Json(albums.into_iter().map(AlbumResponseDto::from).collect()))
}

/// POST /albums - Create an album
///
/// # Responses
///
/// * 201 Created - Album created
/// * 400 Bad Request - Invalid title, artist, date or cover URL
/// * 403 Forbidden - Caller is not an admin
/// * 409 Conflict - An album with the same title exists
#[axum::debug_handler]
async fn create_album(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(dto): Json<CreateAlbumDto>,
) -> Result<(StatusCode, Json<AlbumResponseDto>), ApiError> {
    dto.validate()?;

    let album = state.albums.create.execute(dto.into()).await?;

    Ok((StatusCode::CREATED, Json(AlbumResponseDto::from(album))))
}

/// GET /albums/:id - Album with its tracks
#[axum::debug_handler]
async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AlbumDetailsResponseDto>, ApiError> {
    let album_id: AlbumId = parse_id(&id)?;
    let album = state.albums.details.execute(&album_id).await?;
    Ok(Json(album.into()))
}

/// PUT /albums/:id - Update album metadata. Absent fields are kept.
#[axum::debug_handler]
async fn update_album(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateAlbumDto>,
) -> Result<Json<AlbumResponseDto>, ApiError> {
    dto.validate()?;

    let album_id: AlbumId = parse_id(&id)?;
    let album = state.albums.update.execute(&album_id, dto.into()).await?;
    Ok(Json(album.into()))
}

/// DELETE /albums/:id - Delete an album, detaching its tracks
#[axum::debug_handler]
async fn delete_album(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let album_id: AlbumId = parse_id(&id)?;
    state.albums.delete.execute(&album_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /albums/:id/tracks - Attach a track
///
/// # Responses
///
/// * 204 No Content - Track attached
/// * 404 Not Found - Album or track does not exist
/// * 409 Conflict - Track already belongs to an album
/// * 422 Unprocessable Entity - Album already holds 50 tracks
#[axum::debug_handler]
async fn add_track_to_album(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<AddTrackToAlbumDto>,
) -> Result<StatusCode, ApiError> {
    let album_id: AlbumId = parse_id(&id)?;
    let track_id = TrackId::from_uuid(dto.track_id);
    state.albums.add_track.execute(&album_id, &track_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
async fn remove_track_from_album(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((id, track_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let album_id: AlbumId = parse_id(&id)?;
    let track_id: TrackId = parse_id(&track_id)?;
    state.albums.remove_track.execute(&album_id, &track_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
