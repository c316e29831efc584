//! Genre Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use validator::Validate;

use super::parse_id;
use crate::domain::models::{GenreId, TrackId};
use crate::infrastructure::driving_adapters::api_rest::dto::{AssignGenreDto, CreateGenreDto, GenreResponseDto};
use crate::infrastructure::driving_adapters::api_rest::middleware::AdminUser;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres).post(create_genre))
        .route("/:id", delete(delete_genre))
        .route("/tracks/:track_id", get(get_track_genres).post(assign_genre))
        .route("/tracks/:track_id/:genre_id", delete(remove_genre))
}

#[axum::debug_handler]
async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<GenreResponseDto>>, ApiError> {
    let genres = state.genres.list.execute().await?;
    Ok(Json(genres.into_iter().map(GenreResponseDto::from).collect()))
}

/// POST /genres - Create a genre
///
/// # Responses
///
/// * 201 Created - Genre created
/// * 400 Bad Request - Name shorter than 2 or longer than 50 characters
/// * 409 Conflict - Name already exists, ignoring case
#[axum::debug_handler]
async fn create_genre(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(dto): Json<CreateGenreDto>,
) -> Result<(StatusCode, Json<GenreResponseDto>), ApiError> {
    dto.validate()?;

    let genre = state.genres.create.execute(&dto.name).await?;

    Ok((StatusCode::CREATED, Json(GenreResponseDto::from(genre))))
}

#[axum::debug_handler]
async fn delete_genre(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let genre_id: GenreId = parse_id(&id)?;
    state.genres.delete.execute(&genre_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /genres/tracks/:track_id - Genres of a track ordered by name
#[axum::debug_handler]
async fn get_track_genres(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> Result<Json<Vec<GenreResponseDto>>, ApiError> {
    let track_id: TrackId = parse_id(&track_id)?;
    let genres = state.genres.track_genres.execute(&track_id).await?;
    Ok(Json(genres.into_iter().map(GenreResponseDto::from).collect()))
}

/// POST /genres/tracks/:track_id - Tag a track with a genre
///
/// # Responses
///
/// * 204 No Content - Genre assigned
/// * 404 Not Found - Track or genre does not exist
/// * 409 Conflict - Genre already assigned
/// * 422 Unprocessable Entity - Track already has 5 genres
#[axum::debug_handler]
async fn assign_genre(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(track_id): Path<String>,
    Json(dto): Json<AssignGenreDto>,
) -> Result<StatusCode, ApiError> {
    let track_id: TrackId = parse_id(&track_id)?;
    let genre_id = GenreId::from_uuid(dto.genre_id);
    state.genres.assign.execute(&track_id, &genre_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
async fn remove_genre(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((track_id, genre_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let track_id: TrackId = parse_id(&track_id)?;
    let genre_id: GenreId = parse_id(&genre_id)?;
    state.genres.unassign.execute(&track_id, &genre_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
