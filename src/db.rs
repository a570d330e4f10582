use std::str::FromStr;

use serde::Deserialize;
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection url, e.g. `sqlite://books.db`.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Invalid database url")]
    Url(#[source] sqlx::Error),
    #[error("Failed to connect")]
    Connect(#[source] sqlx::Error),
    #[error("Failed to run migrations")]
    Migrate(#[source] MigrateError),
}

/// Pooled connection to the books database.
///
/// Cloning is cheap, all clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool described by `config` and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(DatabaseError::Url)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(DatabaseError::Connect)?;

        tracing::info!(url = %config.url, "Connected to database");

        Self::migrated(pool).await
    }

    /// Opens a private in-memory database.
    ///
    /// Every sqlite connection to `:memory:` gets its own database, so the pool is pinned to a
    /// single connection that never expires.
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(DatabaseError::Url)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(DatabaseError::Connect)?;

        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> Result<Self, DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DatabaseError::Migrate)?;

        tracing::debug!("Migrations applied");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Executes a parameterless statement and returns the number of affected rows.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(sql).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Closes the pool, waiting for checked out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;

        tracing::info!("Database closed");
    }
}
