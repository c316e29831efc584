//! PostgreSQL Listening History Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::HistoryRepository;
use crate::domain::models::{AlbumId, HistoryEntry, HistoryEntryId, ListenedTrack, NewPlayback, TrackId, UserId};
use crate::shared::errors::RepositoryError;

/// History entry joined with its track and album title
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    user_id: Uuid,
    listened_at: DateTime<Utc>,
    track_id: Uuid,
    title: String,
    artist_name: String,
    duration_secs: i32,
    cover_url: Option<String>,
    album_id: Option<Uuid>,
    album_title: Option<String>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            id: HistoryEntryId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            listened_at: row.listened_at,
            track: ListenedTrack {
                id: TrackId::from_uuid(row.track_id),
                title: row.title,
                artist_name: row.artist_name,
                duration_secs: row.duration_secs,
                cover_url: row.cover_url,
                album_id: row.album_id.map(AlbumId::from_uuid),
                album_title: row.album_title,
            },
        }
    }
}

const HISTORY_SELECT: &str = r"
    SELECT h.id, h.user_id, h.listened_at,
           t.id AS track_id, t.title, t.artist_name, t.duration_secs,
           COALESCE(t.cover_url, a.cover_url) AS cover_url,
           t.album_id, a.title AS album_title
    FROM listening_history h
    JOIN tracks t ON t.id = h.track_id
    LEFT JOIN albums a ON a.id = t.album_id
";

/// PostgreSQL implementation of HistoryRepository
pub struct PostgresHistoryRepository {
    pool: PgPool,
}

impl PostgresHistoryRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryRepository {
    async fn append_unless_throttled(
        &self,
        playback: &NewPlayback,
        since: DateTime<Utc>,
        max_plays: i64,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Serializes playbacks of the same user
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR NO KEY UPDATE")
            .bind(playback.user_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO listening_history (id, user_id, track_id, listened_at)
            SELECT $1, $2, $3, $4
            WHERE (
                SELECT COUNT(*) FROM listening_history
                WHERE user_id = $2 AND track_id = $3 AND listened_at >= $5
            ) < $6
            "#,
        )
        .bind(playback.id.as_uuid())
        .bind(playback.user_id.as_uuid())
        .bind(playback.track_id.as_uuid())
        .bind(playback.listened_at)
        .bind(since)
        .bind(max_plays)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_recent_plays(
        &self,
        user_id: &UserId,
        track_id: &TrackId,
        since: DateTime<Utc>,
    ) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM listening_history
            WHERE user_id = $1 AND track_id = $2 AND listened_at >= $3
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(track_id.as_uuid())
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "{HISTORY_SELECT} WHERE h.user_id = $1 ORDER BY h.listened_at DESC LIMIT $2"
        ))
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    async fn find_since(&self, user_id: &UserId, since: DateTime<Utc>) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "{HISTORY_SELECT} WHERE h.user_id = $1 AND h.listened_at >= $2 ORDER BY h.listened_at DESC"
        ))
        .bind(user_id.as_uuid())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
