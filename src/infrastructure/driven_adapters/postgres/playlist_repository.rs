//! PostgreSQL Playlist Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::track_repository::{TrackRow, TRACK_COLUMNS};
use crate::domain::gateways::PlaylistRepository;
use crate::domain::models::{Playlist, PlaylistId, Track, TrackId, UserId};
use crate::shared::errors::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct PlaylistRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    description: String,
    cover_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlaylistRow> for Playlist {
    fn from(row: PlaylistRow) -> Self {
        Playlist::restore(
            PlaylistId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            row.name,
            row.description,
            row.cover_url,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL implementation of PlaylistRepository
pub struct PostgresPlaylistRepository {
    pool: PgPool,
}

impl PostgresPlaylistRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistRepository for PostgresPlaylistRepository {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, RepositoryError> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            SELECT id, owner_id, name, description, cover_url, created_at, updated_at
            FROM playlists
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Playlist::from))
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Playlist>, RepositoryError> {
        let rows = sqlx::query_as::<_, PlaylistRow>(
            r#"
            SELECT id, owner_id, name, description, cover_url, created_at, updated_at
            FROM playlists
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Playlist::from).collect())
    }

    async fn create(&self, playlist: &Playlist) -> Result<Playlist, RepositoryError> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            INSERT INTO playlists (id, owner_id, name, description, cover_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, owner_id, name, description, cover_url, created_at, updated_at
            "#,
        )
        .bind(playlist.id().as_uuid())
        .bind(playlist.owner_id().as_uuid())
        .bind(playlist.name())
        .bind(playlist.description())
        .bind(playlist.cover_url())
        .bind(playlist.created_at())
        .bind(playlist.updated_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, playlist: &Playlist) -> Result<Option<Playlist>, RepositoryError> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            UPDATE playlists
            SET name = $2,
                description = $3,
                cover_url = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING id, owner_id, name, description, cover_url, created_at, updated_at
            "#,
        )
        .bind(playlist.id().as_uuid())
        .bind(playlist.name())
        .bind(playlist.description())
        .bind(playlist.cover_url())
        .bind(playlist.updated_at())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Playlist::from))
    }

    async fn delete(&self, id: &PlaylistId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_tracks(&self, id: &PlaylistId) -> Result<Vec<Track>, RepositoryError> {
        let rows = sqlx::query_as::<_, TrackRow>(&format!(
            r"
            SELECT {TRACK_COLUMNS}
            FROM tracks t
            JOIN playlist_tracks pt ON pt.track_id = t.id
            WHERE pt.playlist_id = $1
            ORDER BY pt.added_at DESC, t.id ASC
            "
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Track::from).collect())
    }

    async fn count_tracks(&self, id: &PlaylistId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM playlist_tracks WHERE playlist_id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn contains_track(&self, id: &PlaylistId, track_id: &TrackId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM playlist_tracks WHERE playlist_id = $1 AND track_id = $2)",
        )
        .bind(id.as_uuid())
        .bind(track_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn add_track(&self, id: &PlaylistId, track_id: &TrackId, max_tracks: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM playlists WHERE id = $1 FOR NO KEY UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO playlist_tracks (playlist_id, track_id, added_at)
            SELECT $1, $2, NOW()
            WHERE (SELECT COUNT(*) FROM playlist_tracks WHERE playlist_id = $1) < $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(track_id.as_uuid())
        .bind(max_tracks)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_track(&self, id: &PlaylistId, track_id: &TrackId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = $1 AND track_id = $2")
            .bind(id.as_uuid())
            .bind(track_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
