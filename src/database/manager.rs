use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

/// Errors from registry database setup and access
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("invalid registry database URL: {0}")]
    InvalidRegistryUrl(String),

    #[error("registry schema bootstrap failed: {0}")]
    Migration(sqlx::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Registry table holding one row per tenant. `id` keys the per-tenant
/// database file; `name` is the externally visible slug.
const REGISTRY_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS tenant (
  id           INTEGER PRIMARY KEY AUTOINCREMENT,
  name         TEXT    NOT NULL UNIQUE,
  display_name TEXT    NOT NULL,
  created_at   INTEGER NOT NULL,
  updated_at   INTEGER NOT NULL
)";

/// Open the shared registry database, creating the file and bootstrapping
/// the schema on first use.
pub async fn connect_registry(url: &str) -> Result<SqlitePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|_| DatabaseError::InvalidRegistryUrl(url.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;

    info!("opened registry database at {}", url);
    Ok(pool)
}

/// Idempotent registry schema bootstrap.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query(REGISTRY_SCHEMA)
        .execute(pool)
        .await
        .map_err(DatabaseError::Migration)?;
    Ok(())
}

/// Pings the registry to ensure connectivity
pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    #[tokio::test]
    async fn test_schema_bootstrap_is_idempotent() {
        let pool = memory_pool().await;
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenant")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_health_check_succeeds_on_open_pool() {
        let pool = memory_pool().await;
        ensure_schema(&pool).await.unwrap();
        health_check(&pool).await.unwrap();
    }
}
