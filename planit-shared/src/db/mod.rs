/// Database layer
///
/// # Modules
///
/// - `pool`: SQLite connection pool with startup health check
/// - `migrations`: embedded migration runner
///
/// Models live in the `models` module at crate root.

pub mod migrations;
pub mod pool;

/// Fresh in-memory database for unit tests, schema applied.
///
/// Capped at one connection: pooled in-memory SQLite connections do not share
/// a database.
#[cfg(test)]
pub async fn test_pool() -> sqlx::SqlitePool {
    let pool = pool::create_pool(pool::DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Default::default()
    })
    .await
    .expect("in-memory pool");

    migrations::run_migrations(&pool)
        .await
        .expect("migrations apply");

    pool
}
