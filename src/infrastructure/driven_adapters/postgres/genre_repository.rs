//! PostgreSQL Genre Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::GenreRepository;
use crate::domain::models::{Genre, GenreId, TrackId};
use crate::shared::errors::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct GenreRow {
    id: Uuid,
    name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::restore(GenreId::from_uuid(row.id), row.name)
    }
}

/// PostgreSQL implementation of GenreRepository
pub struct PostgresGenreRepository {
    pool: PgPool,
}

impl PostgresGenreRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PostgresGenreRepository {
    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, RepositoryError> {
        let row = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Genre::from))
    }

    async fn find_all(&self) -> Result<Vec<Genre>, RepositoryError> {
        let rows = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM genres WHERE LOWER(name) = LOWER($1))",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, genre: &Genre) -> Result<Genre, RepositoryError> {
        let row = sqlx::query_as::<_, GenreRow>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(genre.id().as_uuid())
        .bind(genre.name())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: &GenreId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_track(&self, track_id: &TrackId) -> Result<Vec<Genre>, RepositoryError> {
        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN track_genres tg ON tg.genre_id = g.id
            WHERE tg.track_id = $1
            ORDER BY g.name ASC
            "#,
        )
        .bind(track_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn count_by_track(&self, track_id: &TrackId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM track_genres WHERE track_id = $1")
            .bind(track_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn is_assigned(&self, track_id: &TrackId, genre_id: &GenreId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM track_genres WHERE track_id = $1 AND genre_id = $2)",
        )
        .bind(track_id.as_uuid())
        .bind(genre_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn assign(&self, track_id: &TrackId, genre_id: &GenreId, max_genres: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM tracks WHERE id = $1 FOR NO KEY UPDATE")
            .bind(track_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(RepositoryError::NotFound(track_id.to_string()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO track_genres (track_id, genre_id)
            SELECT $1, $2
            WHERE (SELECT COUNT(*) FROM track_genres WHERE track_id = $1) < $3
            "#,
        )
        .bind(track_id.as_uuid())
        .bind(genre_id.as_uuid())
        .bind(max_genres)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unassign(&self, track_id: &TrackId, genre_id: &GenreId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM track_genres WHERE track_id = $1 AND genre_id = $2")
            .bind(track_id.as_uuid())
            .bind(genre_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
