//! Database Connection Management
//!
//! Utilities for creating and managing database connections.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::config::DatabaseConfig;

/// Create a PostgreSQL connection pool from configuration
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be reached.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await
}

/// Apply the embedded schema migrations
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or was modified after being applied.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
