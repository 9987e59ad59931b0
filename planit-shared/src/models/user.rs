/// User account model and database operations
///
/// Accounts carry a unique, case-sensitive username and an Argon2id password
/// hash. The numeric id is assigned by the database at creation and never
/// changes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id       INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT UNIQUE NOT NULL,
///     password TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use planit_shared::models::user::User;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, "alice", "$argon2id$...").await?;
/// println!("Created account {}", user.id);
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User account
///
/// The `password` column holds an Argon2id PHC string, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Account identifier, assigned at creation, immutable
    pub id: i64,

    /// Unique username (case-sensitive)
    pub username: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Creates a new account
    ///
    /// # Errors
    ///
    /// A duplicate username surfaces as a unique-constraint database error;
    /// the caller maps it to the "user already exists" outcome.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds an account by username
    ///
    /// Lookup is case-sensitive; returns `None` when no account matches.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts accounts, used by tests to assert duplicate registration
    /// creates no second row
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
