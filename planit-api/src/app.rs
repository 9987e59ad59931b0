/// Application state and router builder
///
/// # Router layout
///
/// ```text
/// /
/// ├── GET  /health              # liveness + database ping (public)
/// ├── POST /register            # create account (public)
/// ├── POST /login               # exchange credentials for a token (public)
/// ├── GET  /tasks               # protected
/// ├── POST /tasks               # protected
/// ├── GET  /tasks/search        # protected
/// ├── PUT  /tasks/:id           # protected
/// ├── DELETE /tasks/:id         # protected
/// ├── GET  /events              # protected
/// └── POST /events              # protected
/// ```
///
/// Every protected route sits behind one auth-middleware layer; there is no
/// path to a resource handler that skips it, and handlers receive the
/// caller's identity only through the [`AuthUser`] extension the middleware
/// inserts.

use crate::config::Config;
use axum::{
    routing::{get, post, put},
    Router,
};
use planit_shared::auth::middleware::require_auth;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; `Arc` keeps the clone
/// cheap. The signing secret inside is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no identity required
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Protected routes: one auth gateway layer guards them all
    let secret = state.jwt_secret().to_string();
    let protected_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/tasks/search", get(routes::tasks::search_tasks))
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route(
            "/events",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .layer(axum::middleware::from_fn(move |req, next| {
            require_auth(secret.clone(), req, next)
        }));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Mobile clients call from emulator/device origins
        .layer(CorsLayer::permissive())
        .with_state(state)
}
