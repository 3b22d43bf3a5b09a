//! Database connection pool management and schema bootstrap.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:gatehouse.db".to_string(),
            max_connections: 5,
            connect_timeout_secs: 5,
            idle_timeout_secs: 600,
        }
    }
}

/// Creates a SQLite connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await
}

/// Creates the three asset tables if they do not exist yet. Idempotent, so it
/// is safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS computers (
            id BLOB PRIMARY KEY,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            color TEXT,
            photo_url TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            owner_name TEXT NOT NULL,
            checkin_at TEXT,
            checkout_at TEXT,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS medical_devices (
            id BLOB PRIMARY KEY,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            photo_url TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            owner_name TEXT NOT NULL,
            serial TEXT NOT NULL UNIQUE,
            checkin_at TEXT,
            checkout_at TEXT,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS frequent_computers (
            id BLOB PRIMARY KEY,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            photo_url TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            owner_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            last_checkin_at TEXT,
            last_checkout_at TEXT,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
