/// Calendar event endpoints
///
/// # Endpoints
///
/// - `GET  /events` - list the caller's events
/// - `POST /events` - create an event owned by the caller
///
/// Identity comes only from the auth gateway's [`AuthUser`] extension, as
/// with tasks.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use planit_shared::{
    auth::middleware::AuthUser,
    models::event::{CreateEvent, Event},
};
use serde::Deserialize;
use validator::Validate;

/// Create event request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event title
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 200, message = "title must be between 1 and 200 characters")
    )]
    pub title: Option<String>,

    /// Event date string (e.g. "2026-08-29")
    #[validate(
        required(message = "date is required"),
        length(min = 1, max = 20, message = "date must be between 1 and 20 characters")
    )]
    pub date: Option<String>,
}

/// List the caller's events
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Event>>> {
    let events = Event::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(events))
}

/// Create an event owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (itemized)
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    req.validate()?;

    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("title is required".to_string()))?;
    let date = req
        .date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::BadRequest("date is required".to_string()))?;

    let event = Event::create(&state.db, auth.user_id, CreateEvent { title, date }).await?;

    Ok((StatusCode::CREATED, Json(event)))
}
