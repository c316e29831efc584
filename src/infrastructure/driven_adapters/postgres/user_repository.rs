//! PostgreSQL User and Session Repositories

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::{SessionRepository, UserRepository};
use crate::domain::models::{Permission, Session, SessionId, User, UserId};
use crate::shared::errors::RepositoryError;

/// Database row representation for the users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    login: String,
    password_hash: String,
    permission: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let permission: Permission = row
            .permission
            .parse()
            .map_err(|e| RepositoryError::Mapping(format!("Failed to parse permission: {e}")))?;

        Ok(User::restore(
            UserId::from_uuid(row.id),
            row.login,
            row.password_hash,
            permission,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login, password_hash, permission, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login, password_hash, permission, created_at, updated_at
            FROM users
            WHERE LOWER(login) = LOWER($1)
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, login, password_hash, permission, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, login, password_hash, permission, created_at, updated_at
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.login())
        .bind(user.password_hash())
        .bind(user.permission().as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .fetch_one(&self.pool)
        .await?;

        User::try_from(row)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET permission = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING id, login, password_hash, permission, created_at, updated_at
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.permission().as_str())
        .bind(user.updated_at())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session::restore(
            SessionId::from_uuid(row.id),
            UserId::from_uuid(row.user_id),
            row.expires_at,
            row.created_at,
        )
    }
}

/// PostgreSQL implementation of SessionRepository
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (id, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, expires_at, created_at
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_uuid())
        .bind(session.expires_at())
        .bind(session.created_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, expires_at, created_at FROM sessions WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Session::from))
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
