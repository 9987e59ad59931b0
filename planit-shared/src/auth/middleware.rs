/// Authentication middleware for axum
///
/// The single choke point for request identity: extracts the
/// `Authorization: Bearer <token>` header, validates the token, and injects
/// the resolved [`AuthUser`] into request extensions. Handlers learn the
/// caller's identity from that extension and nowhere else - no body field,
/// query parameter, or path segment is ever consulted for authorization.
///
/// # Rejections
///
/// All three failure modes are 401 with fixed message text:
///
/// - missing header: "Authentication required"
/// - header not shaped `Bearer <token>`: "Invalid authorization header"
/// - signature/expiry/parse failure: "Invalid or expired token"
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use planit_shared::auth::middleware::{require_auth, AuthUser};
///
/// async fn protected_handler(auth: AuthUser) -> String {
///     format!("Hello, {}!", auth.username)
/// }
///
/// let secret = "your-jwt-secret".to_string();
/// let app: Router = Router::new()
///     .route("/tasks", get(protected_handler))
///     .layer(middleware::from_fn(move |req, next| {
///         require_auth(secret.clone(), req, next)
///     }));
/// ```

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::token::validate_token;

/// Authenticated identity attached to request extensions
///
/// Extractable directly in handler signatures; extraction fails with 401 if
/// the request did not pass through [`require_auth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Authenticated account identifier
    pub user_id: i64,

    /// Authenticated username
    pub username: String,
}

/// Error type for the authentication gateway
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header present
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    MalformedHeader,

    /// Token failed validation (signature, expiry, or parse)
    InvalidToken,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "Authentication required",
            AuthError::MalformedHeader => "Invalid authorization header",
            AuthError::InvalidToken => "Invalid or expired token",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "unauthorized",
            "message": self.message(),
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Authentication middleware
///
/// Validates the bearer token and attaches [`AuthUser`] to the request. Apply
/// as a layer over every protected route group so no resource handler is
/// reachable without it.
pub async fn require_auth(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = parse_bearer(auth_header)?;

    let claims = validate_token(token, &secret).map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Splits an Authorization header into the expected `Bearer <token>` shape
fn parse_bearer(header_value: &str) -> Result<&str, AuthError> {
    match header_value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}
