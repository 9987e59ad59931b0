/// Calendar event model and owner-scoped database operations
///
/// Events follow the same ownership rule as tasks: every query binds the
/// owning account id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE events (
///     id      INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     title   TEXT NOT NULL,
///     date    TEXT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Calendar event row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    /// Event identifier
    pub id: i64,

    /// Owning account (never reassigned)
    pub user_id: i64,

    /// Event title
    pub title: String,

    /// Event date, stored as the client-supplied string (e.g. "2026-08-29")
    pub date: String,
}

/// Input for creating an event
#[derive(Debug, Clone)]
pub struct CreateEvent {
    /// Event title (required)
    pub title: String,

    /// Event date (required)
    pub date: String,
}

impl Event {
    /// Lists all events owned by an account
    ///
    /// Returns an empty vec (not an error) when the account owns nothing.
    pub async fn list_by_owner(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, user_id, title, date
            FROM events
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Creates an event owned by the given account
    pub async fn create(
        pool: &SqlitePool,
        owner_id: i64,
        data: CreateEvent,
    ) -> Result<Self, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (user_id, title, date)
            VALUES (?, ?, ?)
            RETURNING id, user_id, title, date
            "#,
        )
        .bind(owner_id)
        .bind(data.title)
        .bind(data.date)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }
}
