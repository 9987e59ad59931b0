/// API route handlers
///
/// Organized by resource:
///
/// - `health`: liveness check
/// - `auth`: registration and login (public)
/// - `tasks`: owner-scoped task CRUD and search (protected)
/// - `events`: owner-scoped calendar events (protected)

pub mod auth;
pub mod events;
pub mod health;
pub mod tasks;
