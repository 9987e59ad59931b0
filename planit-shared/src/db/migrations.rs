/// Database migration runner
///
/// Migrations are embedded at compile time from the `migrations/` directory
/// of this crate via `sqlx::migrate!` and applied on startup. They are
/// idempotent: already-applied versions are skipped.

use sqlx::SqlitePool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed or a statement fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
