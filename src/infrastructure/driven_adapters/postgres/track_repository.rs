//! PostgreSQL Track Repository Implementation
//!
//! Play counts are not stored; every query derives them from `listening_history`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::gateways::TrackRepository;
use crate::domain::models::{AlbumId, Track, TrackId};
use crate::shared::errors::RepositoryError;

/// Column list for track queries aliased as `t`
pub(super) const TRACK_COLUMNS: &str = r"
    t.id, t.title, t.artist_name, t.duration_secs, t.file_path, t.content_type,
    t.file_size, t.album_id, t.cover_url, t.added_at, t.updated_at,
    (SELECT COUNT(*) FROM listening_history h WHERE h.track_id = t.id) AS play_count
";

/// Database row representation for the tracks table
#[derive(Debug, sqlx::FromRow)]
pub(super) struct TrackRow {
    id: Uuid,
    title: String,
    artist_name: String,
    duration_secs: i32,
    file_path: String,
    content_type: String,
    file_size: i64,
    album_id: Option<Uuid>,
    cover_url: Option<String>,
    added_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    play_count: i64,
}

impl From<TrackRow> for Track {
    fn from(row: TrackRow) -> Self {
        Track::restore(
            TrackId::from_uuid(row.id),
            row.title,
            row.artist_name,
            row.duration_secs,
            row.file_path,
            row.content_type,
            row.file_size,
            row.album_id.map(AlbumId::from_uuid),
            row.cover_url,
            row.added_at,
            row.updated_at,
            row.play_count,
        )
    }
}

/// Lock the album row and check that it holds fewer than `max_tracks` tracks
/// besides `track_id`. Concurrent writers to the same album wait on the lock.
async fn lock_album_with_room(
    tx: &mut Transaction<'_, Postgres>,
    album_id: &AlbumId,
    track_id: &TrackId,
    max_tracks: i64,
) -> Result<bool, RepositoryError> {
    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM albums WHERE id = $1 FOR NO KEY UPDATE")
        .bind(album_id.as_uuid())
        .fetch_optional(&mut **tx)
        .await?;
    if locked.is_none() {
        return Err(RepositoryError::NotFound(album_id.to_string()));
    }

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tracks WHERE album_id = $1 AND id <> $2")
        .bind(album_id.as_uuid())
        .bind(track_id.as_uuid())
        .fetch_one(&mut **tx)
        .await?;

    Ok(count < max_tracks)
}

/// Escape `%`, `_` and the escape character itself for use in a LIKE pattern
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// PostgreSQL implementation of TrackRepository
pub struct PostgresTrackRepository {
    pool: PgPool,
}

impl PostgresTrackRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: &Uuid) -> Result<Option<Track>, RepositoryError> {
        let row = sqlx::query_as::<_, TrackRow>(&format!(
            "SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Track::from))
    }
}

#[async_trait]
impl TrackRepository for PostgresTrackRepository {
    async fn find_by_id(&self, id: &TrackId) -> Result<Option<Track>, RepositoryError> {
        self.fetch_by_id(id.as_uuid()).await
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Track>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(query));
        let rows = sqlx::query_as::<_, TrackRow>(&format!(
            r"
            SELECT {TRACK_COLUMNS}
            FROM tracks t
            WHERE t.title ILIKE $1 ESCAPE '\' OR t.artist_name ILIKE $1 ESCAPE '\'
            ORDER BY t.title ASC, t.id ASC
            LIMIT $2
            "
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Track::from).collect())
    }

    async fn find_by_album(&self, album_id: &AlbumId) -> Result<Vec<Track>, RepositoryError> {
        let rows = sqlx::query_as::<_, TrackRow>(&format!(
            r"
            SELECT {TRACK_COLUMNS}
            FROM tracks t
            WHERE t.album_id = $1
            ORDER BY t.added_at ASC, t.id ASC
            "
        ))
        .bind(album_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Track::from).collect())
    }

    async fn count_by_album(&self, album_id: &AlbumId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tracks WHERE album_id = $1")
            .bind(album_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, track: &Track, max_album_tracks: i64) -> Result<Option<Track>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if let Some(album_id) = track.album_id() {
            if !lock_album_with_room(&mut tx, album_id, track.id(), max_album_tracks).await? {
                return Ok(None);
            }
        }

        sqlx::query(
            r#"
            INSERT INTO tracks (
                id, title, artist_name, duration_secs, file_path, content_type,
                file_size, album_id, cover_url, added_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(track.id().as_uuid())
        .bind(track.title())
        .bind(track.artist_name())
        .bind(track.duration_secs())
        .bind(track.file_path())
        .bind(track.content_type())
        .bind(track.file_size())
        .bind(track.album_id().map(AlbumId::as_uuid))
        .bind(track.cover_url())
        .bind(track.added_at())
        .bind(track.updated_at())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.fetch_by_id(track.id().as_uuid())
            .await?
            .map(Some)
            .ok_or_else(|| RepositoryError::NotFound(track.id().to_string()))
    }

    async fn update(&self, track: &Track) -> Result<Option<Track>, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE tracks
            SET title = $2,
                artist_name = $3,
                album_id = $4,
                cover_url = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(track.id().as_uuid())
        .bind(track.title())
        .bind(track.artist_name())
        .bind(track.album_id().map(AlbumId::as_uuid))
        .bind(track.cover_url())
        .bind(track.updated_at())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_by_id(track.id().as_uuid()).await
    }

    async fn attach_to_album(&self, id: &TrackId, album_id: &AlbumId, max_tracks: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !lock_album_with_room(&mut tx, album_id, id, max_tracks).await? {
            return Ok(false);
        }

        let result = sqlx::query("UPDATE tracks SET album_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .bind(album_id.as_uuid())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn clear_album(&self, id: &TrackId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE tracks SET album_id = NULL, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &TrackId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"c:\x"), r"c:\\x");
        assert_eq!(escape_like("blue"), "blue");
    }
}
