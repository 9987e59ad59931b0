/// Database connection pool management
///
/// SQLite connection pool built on sqlx, with a health check at startup.
/// The pool is the only mutable shared state in the system; every operation
/// issued through it is a single statement, so row-level atomicity comes from
/// SQLite's own transaction per statement.
///
/// # Example
///
/// ```no_run
/// use planit_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite:planit.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     # drop(pool);
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. "sqlite:planit.db" or "sqlite::memory:")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// In-memory databases must use 1: each pooled connection would otherwise
    /// open its own private database.
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:planit.db".to_string(),
            max_connections: 5,
            connect_timeout_seconds: 30,
        }
    }
}

/// Creates and initializes a SQLite connection pool
///
/// Creates the database file if missing, enforces foreign keys, and performs
/// a health check before returning.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database cannot be opened, or
/// the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(options)
        .await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "sqlite:planit.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_in_memory_pool_health() {
        let pool = create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        })
        .await
        .expect("Should create in-memory pool");

        health_check(&pool).await.expect("Health check should pass");
    }
}
