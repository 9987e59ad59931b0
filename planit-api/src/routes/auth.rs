/// Account endpoints: registration and login
///
/// # Endpoints
///
/// - `POST /register` - create an account
/// - `POST /login` - exchange credentials for a bearer token
///
/// Login failures are reported as a single "Invalid credentials" message
/// whether the username was unknown or the password wrong.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use planit_shared::{
    auth::{password, token},
    models::user::User,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username, unique across all accounts
    #[validate(
        required(message = "username is required"),
        length(min = 1, max = 50, message = "username must be between 1 and 50 characters")
    )]
    pub username: Option<String>,

    /// Plaintext password; only its Argon2id hash is stored
    #[validate(
        required(message = "password is required"),
        length(min = 6, max = 100, message = "password must be between 6 and 100 characters")
    )]
    pub password: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username is required")
    )]
    pub username: Option<String>,

    /// Password
    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password is required")
    )]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Confirmation message
    pub message: String,

    /// Bearer token, valid for 24 hours
    pub token: String,

    /// Account identifier
    pub user_id: i64,

    /// Account username
    pub username: String,
}

/// Register a new account
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (itemized)
/// - `409 Conflict`: username already exists
/// - `500 Internal Server Error`: unexpected store failure (logged, generic)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("username is required".to_string()))?;
    let password = req
        .password
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("password is required".to_string()))?;

    let password_hash = password::hash_password(password)?;

    User::create(&state.db, username, &password_hash).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login and obtain a bearer token
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: unknown username or wrong password, undifferentiated
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| ApiError::BadRequest("username is required".to_string()))?;
    let password = req
        .password
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("password is required".to_string()))?;

    let invalid_credentials = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !password::verify_password(password, &user.password) {
        return Err(invalid_credentials());
    }

    let token = token::issue_token(user.id, &user.username, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user_id: user.id,
        username: user.username,
    }))
}
