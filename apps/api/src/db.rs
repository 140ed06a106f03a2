use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Creates the SQLite connection pool and brings the schema up to date.
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection, which the catalog relies on for cascading deletes.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true);

    // Each in-memory connection is its own database, so keep exactly one.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("SQLite pool established and migrations applied");
    Ok(pool)
}

#[cfg(test)]
pub async fn seeded_memory_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    let catalog = crate::seed::Catalog::embedded().unwrap();
    crate::seed::seed_if_empty(&pool, &catalog).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_has_schema() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("naviq.db");
        let url = format!("sqlite://{}", path.display());

        let pool = create_pool(&url).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }
}
