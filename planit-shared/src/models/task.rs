/// Task model and owner-scoped database operations
///
/// Every query on this model binds the owner's account id. A task is never
/// addressable by its own id alone: reads, updates, and deletes all filter by
/// `(id, user_id)`, so a caller probing another account's task ids gets the
/// same "no rows" outcome as probing ids that do not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id     INTEGER NOT NULL REFERENCES users(id),
///     title       TEXT NOT NULL,
///     description TEXT,
///     is_done     INTEGER NOT NULL DEFAULT 0
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use planit_shared::models::task::{CreateTask, Task};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, owner_id: i64) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, owner_id, CreateTask {
///     title: "Buy milk".to_string(),
///     description: None,
/// }).await?;
///
/// let mine = Task::list_by_owner(&pool, owner_id).await?;
/// assert_eq!(mine.len(), 1);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task row
///
/// `is_done` is stored and serialized as 0/1, the shape the mobile clients
/// consume.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Task identifier
    pub id: i64,

    /// Owning account (never reassigned)
    pub user_id: i64,

    /// Task title
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Completion flag (0 = open, 1 = done)
    pub is_done: i64,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for a partial task update
///
/// `None` fields keep their current stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion flag (0/1)
    pub is_done: Option<i64>,
}

impl Task {
    /// Lists all tasks owned by an account
    ///
    /// Returns an empty vec (not an error) when the account owns nothing.
    pub async fn list_by_owner(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, is_done
            FROM tasks
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Creates a task owned by the given account
    ///
    /// The owner id comes from the authenticated identity; nothing in the
    /// request body can influence it.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: i64,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description)
            VALUES (?, ?, ?)
            RETURNING id, user_id, title, description, is_done
            "#,
        )
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Searches an account's tasks by title substring
    ///
    /// The search term is bound as a LIKE pattern value; it never becomes part
    /// of the query text, so metacharacters like quotes are matched literally.
    pub async fn search_by_title(
        pool: &SqlitePool,
        owner_id: i64,
        query: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = format!("%{}%", query);

        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, is_done
            FROM tasks
            WHERE user_id = ? AND title LIKE ?
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .bind(pattern)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by id, scoped to its owner
    ///
    /// Returns `None` both when the task does not exist and when it belongs
    /// to a different account; the two cases are indistinguishable.
    pub async fn find_by_id_and_owner(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, is_done
            FROM tasks
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update to an owned task
    ///
    /// Fields omitted from `data` retain their stored values. Returns `None`
    /// when no task matches `(id, owner_id)`.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(current) = Self::find_by_id_and_owner(pool, id, owner_id).await? else {
            return Ok(None);
        };

        let title = data.title.unwrap_or(current.title);
        let description = data.description.or(current.description);
        let is_done = data.is_done.unwrap_or(current.is_done);

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, is_done = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, title, description, is_done
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(is_done)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes an owned task, returning the number of rows affected
    ///
    /// Zero rows means "not found" - whether the task was absent or owned by
    /// someone else is deliberately not distinguishable.
    pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
