//! PostgreSQL Album Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::AlbumRepository;
use crate::domain::models::{Album, AlbumId};
use crate::shared::errors::RepositoryError;

/// Database row representation for the albums table
#[derive(Debug, sqlx::FromRow)]
struct AlbumRow {
    id: Uuid,
    title: String,
    artist: String,
    release_date: NaiveDate,
    cover_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Album::restore(
            AlbumId::from_uuid(row.id),
            row.title,
            row.artist,
            row.release_date,
            row.cover_url,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL implementation of AlbumRepository
pub struct PostgresAlbumRepository {
    pool: PgPool,
}

impl PostgresAlbumRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlbumRepository for PostgresAlbumRepository {
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, RepositoryError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            SELECT id, title, artist, release_date, cover_url, created_at, updated_at
            FROM albums
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Album::from))
    }

    async fn find_all(&self) -> Result<Vec<Album>, RepositoryError> {
        let rows = sqlx::query_as::<_, AlbumRow>(
            r#"
            SELECT id, title, artist, release_date, cover_url, created_at, updated_at
            FROM albums
            ORDER BY title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Album::from).collect())
    }

    async fn create(&self, album: &Album) -> Result<Album, RepositoryError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            INSERT INTO albums (id, title, artist, release_date, cover_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, artist, release_date, cover_url, created_at, updated_at
            "#,
        )
        .bind(album.id().as_uuid())
        .bind(album.title())
        .bind(album.artist())
        .bind(album.release_date())
        .bind(album.cover_url())
        .bind(album.created_at())
        .bind(album.updated_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, album: &Album) -> Result<Option<Album>, RepositoryError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            UPDATE albums
            SET title = $2,
                artist = $3,
                release_date = $4,
                cover_url = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING id, title, artist, release_date, cover_url, created_at, updated_at
            "#,
        )
        .bind(album.id().as_uuid())
        .bind(album.title())
        .bind(album.artist())
        .bind(album.release_date())
        .bind(album.cover_url())
        .bind(album.updated_at())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Album::from))
    }

    async fn delete(&self, id: &AlbumId) -> Result<bool, RepositoryError> {
        // tracks.album_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_title(&self, title: &str, exclude_id: Option<AlbumId>) -> Result<bool, RepositoryError> {
        let exists = match exclude_id {
            Some(id) => {
                sqlx::query_scalar::<_, bool>(
                    r#"
                    SELECT EXISTS(
                        SELECT 1 FROM albums
                        WHERE LOWER(title) = LOWER($1) AND id != $2
                    )
                    "#,
                )
                .bind(title)
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM albums WHERE LOWER(title) = LOWER($1))",
                )
                .bind(title)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(exists)
    }
}
