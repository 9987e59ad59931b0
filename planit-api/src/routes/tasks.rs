/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /tasks` - list the caller's tasks
/// - `POST   /tasks` - create a task owned by the caller
/// - `GET    /tasks/search?q=` - search the caller's tasks by title substring
/// - `PUT    /tasks/:id` - partial update of an owned task
/// - `DELETE /tasks/:id` - delete an owned task
///
/// Every handler takes its identity from the [`AuthUser`] extension the auth
/// gateway injected. No identity-like field in a body, query string, or path
/// is ever consulted; a `user_id` smuggled into a request body is ignored by
/// construction because the DTOs simply have no such field.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use planit_shared::{
    auth::middleware::AuthUser,
    models::task::{CreateTask, Task, UpdateTask},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 200, message = "title must be between 1 and 200 characters")
    )]
    pub title: Option<String>,

    /// Optional description
    #[validate(length(max = 1000, message = "description exceeds maximum length of 1000"))]
    pub description: Option<String>,
}

/// Partial update request; omitted fields keep their stored values
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion flag (0/1)
    pub is_done: Option<i64>,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Title substring to match literally
    pub q: Option<String>,
}

/// Message-only response for update/delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Confirmation message
    pub message: String,
}

/// List the caller's tasks
///
/// Returns an empty array when the account owns nothing.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(tasks))
}

/// Create a task owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (itemized)
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("title is required".to_string()))?;

    let task = Task::create(
        &state.db,
        auth.user_id,
        CreateTask {
            title,
            description: req.description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Search the caller's tasks by title substring
///
/// The term is matched literally via a bound LIKE parameter; injection
/// payloads are just strings that rarely match anything.
///
/// # Errors
///
/// - `400 Bad Request`: missing or empty `q`
pub async fn search_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let tasks = Task::search_by_title(&state.db, auth.user_id, query).await?;

    Ok(Json(tasks))
}

/// Partially update an owned task
///
/// # Errors
///
/// - `404 Not Found`: no task matches `(id, caller)` - absent and owned by
///   someone else are indistinguishable
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let updated = Task::update(
        &state.db,
        id,
        auth.user_id,
        UpdateTask {
            title: req.title,
            description: req.description,
            is_done: req.is_done,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// Delete an owned task
///
/// # Errors
///
/// - `404 Not Found`: zero rows affected, same non-distinguishing policy as
///   update
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let affected = Task::delete(&state.db, id, auth.user_id).await?;

    if affected == 0 {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}
