//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::albums::{
    AddTrackToAlbumUseCase, CreateAlbumUseCase, DeleteAlbumUseCase, GetAlbumDetailsUseCase, ListAlbumsUseCase,
    RemoveTrackFromAlbumUseCase, UpdateAlbumUseCase,
};
use crate::application::use_cases::genres::{
    AssignGenreToTrackUseCase, CreateGenreUseCase, DeleteGenreUseCase, GetTrackGenresUseCase, ListGenresUseCase,
    RemoveGenreFromTrackUseCase,
};
use crate::application::use_cases::history::{
    GetListeningHistoryUseCase, GetRecentPlaysUseCase, RecordPlaybackUseCase,
};
use crate::application::use_cases::playlists::{
    AddTrackToPlaylistUseCase, CreatePlaylistUseCase, DeletePlaylistUseCase, GetPlaylistTracksUseCase,
    GetPlaylistUseCase, ListUserPlaylistsUseCase, RemoveTrackFromPlaylistUseCase, UpdatePlaylistUseCase,
};
use crate::application::use_cases::tracks::{
    DeleteTrackUseCase, GetTrackDetailsUseCase, GetTrackFileUseCase, SearchTracksUseCase, UpdateTrackUseCase,
    UploadTrackUseCase,
};
use crate::application::use_cases::users::{
    AuthenticateUserUseCase, DeleteUserUseCase, EnsureAdminUseCase, GetUserProfileUseCase, LogoutUseCase,
    RegisterUserUseCase, UpdatePermissionUseCase, ValidateSessionUseCase,
};
use crate::domain::gateways::{
    AlbumRepository, AudioStorage, GenreRepository, HistoryRepository, PasswordHasher, PlaylistRepository,
    SessionRepository, TrackRepository, UserRepository,
};
use crate::infrastructure::driven_adapters::config::AppConfig;
use crate::infrastructure::driven_adapters::postgres::{
    PostgresAlbumRepository, PostgresGenreRepository, PostgresHistoryRepository, PostgresPlaylistRepository,
    PostgresSessionRepository, PostgresTrackRepository, PostgresUserRepository,
};
use crate::infrastructure::driven_adapters::{BcryptPasswordHasher, LocalAudioStorage};
use crate::shared::errors::StorageError;

pub struct UserUseCases {
    pub register: RegisterUserUseCase,
    pub authenticate: AuthenticateUserUseCase,
    pub validate_session: ValidateSessionUseCase,
    pub logout: LogoutUseCase,
    pub profile: GetUserProfileUseCase,
    pub update_permission: UpdatePermissionUseCase,
    pub delete: DeleteUserUseCase,
    pub ensure_admin: EnsureAdminUseCase,
}

pub struct TrackUseCases {
    pub upload: UploadTrackUseCase,
    pub search: SearchTracksUseCase,
    pub details: GetTrackDetailsUseCase,
    pub update: UpdateTrackUseCase,
    pub delete: DeleteTrackUseCase,
    pub file: GetTrackFileUseCase,
}

pub struct AlbumUseCases {
    pub create: CreateAlbumUseCase,
    pub list: ListAlbumsUseCase,
    pub details: GetAlbumDetailsUseCase,
    pub update: UpdateAlbumUseCase,
    pub delete: DeleteAlbumUseCase,
    pub add_track: AddTrackToAlbumUseCase,
    pub remove_track: RemoveTrackFromAlbumUseCase,
}

pub struct GenreUseCases {
    pub create: CreateGenreUseCase,
    pub list: ListGenresUseCase,
    pub delete: DeleteGenreUseCase,
    pub track_genres: GetTrackGenresUseCase,
    pub assign: AssignGenreToTrackUseCase,
    pub unassign: RemoveGenreFromTrackUseCase,
}

pub struct PlaylistUseCases {
    pub create: CreatePlaylistUseCase,
    pub get: GetPlaylistUseCase,
    pub tracks: GetPlaylistTracksUseCase,
    pub list_for_user: ListUserPlaylistsUseCase,
    pub update: UpdatePlaylistUseCase,
    pub delete: DeletePlaylistUseCase,
    pub add_track: AddTrackToPlaylistUseCase,
    pub remove_track: RemoveTrackFromPlaylistUseCase,
}

pub struct HistoryUseCases {
    pub record: RecordPlaybackUseCase,
    pub list: GetListeningHistoryUseCase,
    pub recent: GetRecentPlaysUseCase,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<UserUseCases>,
    pub tracks: Arc<TrackUseCases>,
    pub albums: Arc<AlbumUseCases>,
    pub genres: Arc<GenreUseCases>,
    pub playlists: Arc<PlaylistUseCases>,
    pub history: Arc<HistoryUseCases>,
}

impl AppState {
    /// Wire PostgreSQL repositories, disk storage and bcrypt into every use case
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the tracks directory cannot be created.
    pub async fn build(config: AppConfig, pool: PgPool) -> Result<Self, StorageError> {
        let storage = LocalAudioStorage::new(&config.storage.tracks_dir);
        storage.init().await?;

        let user_repository: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
        let session_repository: Arc<dyn SessionRepository> = Arc::new(PostgresSessionRepository::new(pool.clone()));
        let track_repository: Arc<dyn TrackRepository> = Arc::new(PostgresTrackRepository::new(pool.clone()));
        let album_repository: Arc<dyn AlbumRepository> = Arc::new(PostgresAlbumRepository::new(pool.clone()));
        let genre_repository: Arc<dyn GenreRepository> = Arc::new(PostgresGenreRepository::new(pool.clone()));
        let playlist_repository: Arc<dyn PlaylistRepository> =
            Arc::new(PostgresPlaylistRepository::new(pool.clone()));
        let history_repository: Arc<dyn HistoryRepository> = Arc::new(PostgresHistoryRepository::new(pool));
        let audio_storage: Arc<dyn AudioStorage> = Arc::new(storage);
        let password_hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::default());

        let session_ttl = chrono::Duration::seconds(config.jwt.session_ttl_secs);

        let users = UserUseCases {
            register: RegisterUserUseCase::new(user_repository.clone(), password_hasher.clone()),
            authenticate: AuthenticateUserUseCase::new(
                user_repository.clone(),
                session_repository.clone(),
                password_hasher.clone(),
                session_ttl,
            ),
            validate_session: ValidateSessionUseCase::new(user_repository.clone(), session_repository.clone()),
            logout: LogoutUseCase::new(session_repository.clone()),
            profile: GetUserProfileUseCase::new(user_repository.clone()),
            update_permission: UpdatePermissionUseCase::new(user_repository.clone()),
            delete: DeleteUserUseCase::new(user_repository.clone(), session_repository),
            ensure_admin: EnsureAdminUseCase::new(user_repository.clone(), password_hasher),
        };

        let tracks = TrackUseCases {
            upload: UploadTrackUseCase::new(
                track_repository.clone(),
                album_repository.clone(),
                audio_storage.clone(),
                config.storage.upload_policy(),
            ),
            search: SearchTracksUseCase::new(track_repository.clone()),
            details: GetTrackDetailsUseCase::new(
                track_repository.clone(),
                album_repository.clone(),
                genre_repository.clone(),
            ),
            update: UpdateTrackUseCase::new(track_repository.clone(), album_repository.clone()),
            delete: DeleteTrackUseCase::new(track_repository.clone(), audio_storage.clone()),
            file: GetTrackFileUseCase::new(track_repository.clone(), audio_storage),
        };

        let albums = AlbumUseCases {
            create: CreateAlbumUseCase::new(album_repository.clone()),
            list: ListAlbumsUseCase::new(album_repository.clone()),
            details: GetAlbumDetailsUseCase::new(album_repository.clone(), track_repository.clone()),
            update: UpdateAlbumUseCase::new(album_repository.clone()),
            delete: DeleteAlbumUseCase::new(album_repository.clone()),
            add_track: AddTrackToAlbumUseCase::new(album_repository.clone(), track_repository.clone()),
            remove_track: RemoveTrackFromAlbumUseCase::new(album_repository, track_repository.clone()),
        };

        let genres = GenreUseCases {
            create: CreateGenreUseCase::new(genre_repository.clone()),
            list: ListGenresUseCase::new(genre_repository.clone()),
            delete: DeleteGenreUseCase::new(genre_repository.clone()),
            track_genres: GetTrackGenresUseCase::new(genre_repository.clone(), track_repository.clone()),
            assign: AssignGenreToTrackUseCase::new(genre_repository.clone(), track_repository.clone()),
            unassign: RemoveGenreFromTrackUseCase::new(genre_repository),
        };

        let playlists = PlaylistUseCases {
            create: CreatePlaylistUseCase::new(playlist_repository.clone(), user_repository.clone()),
            get: GetPlaylistUseCase::new(playlist_repository.clone()),
            tracks: GetPlaylistTracksUseCase::new(playlist_repository.clone()),
            list_for_user: ListUserPlaylistsUseCase::new(playlist_repository.clone(), user_repository),
            update: UpdatePlaylistUseCase::new(playlist_repository.clone()),
            delete: DeletePlaylistUseCase::new(playlist_repository.clone()),
            add_track: AddTrackToPlaylistUseCase::new(playlist_repository.clone(), track_repository.clone()),
            remove_track: RemoveTrackFromPlaylistUseCase::new(playlist_repository),
        };

        let history = HistoryUseCases {
            record: RecordPlaybackUseCase::new(history_repository.clone(), track_repository),
            list: GetListeningHistoryUseCase::new(history_repository.clone()),
            recent: GetRecentPlaysUseCase::new(history_repository),
        };

        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(users),
            tracks: Arc::new(tracks),
            albums: Arc::new(albums),
            genres: Arc::new(genres),
            playlists: Arc::new(playlists),
            history: Arc::new(history),
        })
    }
}

/// CORS policy from `server.allowed_origins`; `*` or an empty list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|o| o.as_str() != "*")
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Build the full HTTP application: `/health` plus the versioned API
pub fn router(state: AppState) -> Router {
    let upload_limit = usize::try_from(state.config.storage.max_file_size_bytes()).unwrap_or(usize::MAX);

    let api = Router::new()
        .nest("/users", handlers::users::router())
        .nest("/tracks", handlers::tracks::router(upload_limit))
        .nest("/albums", handlers::albums::router())
        .nest("/genres", handlers::genres::router())
        .nest("/playlists", handlers::playlists::router())
        .nest("/history", handlers::history::router());

    Router::new()
        .merge(handlers::health::router())
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(cors_layer(&state.config.server.allowed_origins))
        .with_state(state)
}
