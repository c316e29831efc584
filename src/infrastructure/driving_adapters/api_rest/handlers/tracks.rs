//! Track Handlers
//!
//! Catalog search, admin upload and maintenance, and audio streaming.

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, Query, Request, State},
    http::{
        header::{CONTENT_TYPE, RANGE},
        HeaderValue, StatusCode,
    },
    response::Response,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use validator::Validate;

use super::parse_id;
use crate::domain::models::TrackId;
use crate::infrastructure::driving_adapters::api_rest::dto::track::UploadedFile;
use crate::infrastructure::driving_adapters::api_rest::dto::{
    SearchTracksQuery, TrackDetailsResponseDto, TrackResponseDto, UpdateTrackDto, UploadTrackForm,
};
use crate::infrastructure::driving_adapters::api_rest::middleware::{AdminUser, AuthUser, MaybeAuthUser};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::{ApiError, UseCaseError};

/// Room for the multipart envelope and text fields on top of the audio itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the router for track endpoints
///
/// `upload_limit` is the largest accepted audio file in bytes. Bodies beyond it
/// plus the multipart overhead are cut off before they are buffered.
pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(search_tracks)
                .post(upload_track)
                .layer(DefaultBodyLimit::max(upload_limit.saturating_add(MULTIPART_OVERHEAD_BYTES))),
        )
        .route("/:id", get(get_track).patch(update_track).delete(delete_track))
        .route("/:id/stream", get(stream_track))
        .route("/:id/play", post(play_track))
}

/// GET /tracks?q= - Search by title or artist
///
/// # Responses
///
/// * 200 OK - Up to 100 matches ordered by title
/// * 400 Bad Request - Query shorter than 3 characters
#[axum::debug_handler]
async fn search_tracks(
    State(state): State<AppState>,
    Query(query): Query<SearchTracksQuery>,
) -> Result<Json<Vec<TrackResponseDto>>, ApiError> {
    let tracks = state.tracks.search.execute(&query.q).await?;
    Ok(Json(tracks.into_iter().map(TrackResponseDto::from).collect()))
}

/// Map a multipart read failure, keeping oversized bodies distinguishable
fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UseCaseError::PayloadTooLarge("upload exceeds the maximum file size".to_string()).into()
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// POST /tracks - Upload an audio file with its metadata
///
/// Multipart fields: `file`, `title`, `artist_name`, `album_id`, `duration`, `cover_url`.
///
/// # Authentication
///
/// Requires an admin session.
///
/// # Responses
///
/// * 201 Created - Track stored
/// * 400 Bad Request - Missing or invalid field
/// * 404 Not Found - Album does not exist
/// * 413 Payload Too Large - File exceeds the configured size
/// * 415 Unsupported Media Type - Content type not allowed
/// * 422 Unprocessable Entity - Album is full
#[axum::debug_handler]
async fn upload_track(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<TrackResponseDto>), ApiError> {
    let mut form = UploadTrackForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "artist_name" => form.artist_name = Some(field.text().await.map_err(multipart_error)?),
            "album_id" => form.album_id = Some(field.text().await.map_err(multipart_error)?),
            "duration" => form.duration = Some(field.text().await.map_err(multipart_error)?),
            "cover_url" => form.cover_url = Some(field.text().await.map_err(multipart_error)?),
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    let track = state.tracks.upload.execute(form.into_upload_data()?).await?;

    tracing::info!(admin_id = %admin.user_id, track_id = %track.id(), "Track uploaded via API");
    Ok((StatusCode::CREATED, Json(TrackResponseDto::from(track))))
}

/// GET /tracks/:id - Track with album, genres and play count
#[axum::debug_handler]
async fn get_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackDetailsResponseDto>, ApiError> {
    let track_id: TrackId = parse_id(&id)?;
    let details = state.tracks.details.execute(&track_id).await?;
    Ok(Json(details.into()))
}

#[axum::debug_handler]
async fn update_track(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateTrackDto>,
) -> Result<Json<TrackResponseDto>, ApiError> {
    dto.validate()?;

    let track_id: TrackId = parse_id(&id)?;
    let track = state.tracks.update.execute(&track_id, dto.into()).await?;
    Ok(Json(track.into()))
}

#[axum::debug_handler]
async fn delete_track(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let track_id: TrackId = parse_id(&id)?;
    state.tracks.delete.execute(&track_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Whether a request reads the track from its first byte
fn starts_at_beginning(request: &Request) -> bool {
    request
        .headers()
        .get(RANGE)
        .map_or(true, |range| {
            range
                .to_str()
                .map(|r| r.trim().starts_with("bytes=0-"))
                .unwrap_or(false)
        })
}

/// GET /tracks/:id/stream - Serve the audio with HTTP range support
///
/// A request from a signed-in user that starts at byte 0 counts as a playback.
/// Playback rule violations never interrupt the stream.
#[axum::debug_handler]
async fn stream_track(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let track_id: TrackId = parse_id(&id)?;
    let (track, path) = state.tracks.file.execute(&track_id).await?;

    if let Some(user) = user.filter(|_| starts_at_beginning(&request)) {
        if let Err(e) = state.history.record.execute(&user.user_id, &track_id).await {
            if e.is_internal() {
                tracing::error!(user_id = %user.user_id, track_id = %track_id, error = %e, "Failed to record playback");
            } else {
                tracing::debug!(user_id = %user.user_id, track_id = %track_id, reason = %e, "Playback not recorded");
            }
        }
    }

    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let mut response = response.map(Body::new);

    if response.status().is_success() {
        if let Ok(content_type) = HeaderValue::from_str(track.content_type()) {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
    }
    Ok(response)
}

/// POST /tracks/:id/play - Record a playback explicitly
#[axum::debug_handler]
async fn play_track(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let track_id: TrackId = parse_id(&id)?;
    state.history.record.execute(&user.user_id, &track_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_range(range: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/v1/tracks/x/stream");
        if let Some(range) = range {
            builder = builder.header(RANGE, range);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn full_and_leading_range_requests_count_as_playback() {
        assert!(starts_at_beginning(&request_with_range(None)));
        assert!(starts_at_beginning(&request_with_range(Some("bytes=0-"))));
        assert!(starts_at_beginning(&request_with_range(Some("bytes=0-1023"))));
    }

    #[test]
    fn seeking_does_not_count_as_playback() {
        assert!(!starts_at_beginning(&request_with_range(Some("bytes=1024-"))));
        assert!(!starts_at_beginning(&request_with_range(Some("bytes=100-200"))));
    }
}
