//! Listening History Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::parse_id;
use crate::domain::models::TrackId;
use crate::infrastructure::driving_adapters::api_rest::dto::{HistoryEntryResponseDto, RecentPlaysQuery};
use crate::infrastructure::driving_adapters::api_rest::middleware::AuthUser;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_history))
        .route("/recent", get(get_recent_plays))
        .route("/tracks/:track_id", post(record_playback))
}

/// POST /history/tracks/:track_id - Record that the caller played a track
///
/// # Responses
///
/// * 204 No Content - Playback recorded
/// * 404 Not Found - Track does not exist
/// * 422 Unprocessable Entity - Track shorter than 30 seconds
/// * 429 Too Many Requests - Track played 3 times in the last 5 minutes
#[axum::debug_handler]
async fn record_playback(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let track_id: TrackId = parse_id(&track_id)?;
    state.history.record.execute(&user.user_id, &track_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /history - The caller's last 100 playbacks, newest first
#[axum::debug_handler]
async fn get_history(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntryResponseDto>>, ApiError> {
    let entries = state.history.list.execute(&user.user_id).await?;
    Ok(Json(entries.into_iter().map(HistoryEntryResponseDto::from).collect()))
}

/// GET /history/recent?hours= - Playbacks within the last `hours` (default 24)
#[axum::debug_handler]
async fn get_recent_plays(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<RecentPlaysQuery>,
) -> Result<Json<Vec<HistoryEntryResponseDto>>, ApiError> {
    let entries = state.history.recent.execute(&user.user_id, query.hours).await?;
    Ok(Json(entries.into_iter().map(HistoryEntryResponseDto::from).collect()))
}
