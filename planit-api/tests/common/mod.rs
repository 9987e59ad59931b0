/// Common test utilities for integration tests
///
/// Provides a test context with a fresh in-memory database, the real router,
/// and request helpers for driving it through tower's `Service` interface.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use planit_api::app::{build_router, AppState};
use planit_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use planit_shared::db::{migrations, pool};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::Service as _;

/// Secret used by every test context
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing the app and its database
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context over a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        // In-memory databases need a single connection: each pooled
        // connection would otherwise see its own empty database
        let db = pool::create_pool(pool::DatabaseConfig {
            url: config.database.url.clone(),
            max_connections: 1,
            ..Default::default()
        })
        .await?;

        migrations::run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self { db, app })
    }

    /// Sends a request and returns the raw response
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.expect("infallible")
    }

    /// Sends a JSON request, optionally authenticated
    pub async fn request_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers an account, expecting success
    pub async fn register(&self, username: &str, password: &str) {
        let (status, body) = self
            .request_json(
                "POST",
                "/register",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    }

    /// Logs in and returns `(token, user_id)`
    pub async fn login(&self, username: &str, password: &str) -> (String, i64) {
        let (status, body) = self
            .request_json(
                "POST",
                "/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        (
            body["token"].as_str().unwrap().to_string(),
            body["user_id"].as_i64().unwrap(),
        )
    }

    /// Registers and logs in, returning `(token, user_id)`
    pub async fn register_and_login(&self, username: &str, password: &str) -> (String, i64) {
        self.register(username, password).await;
        self.login(username, password).await
    }
}
