/// Database models
///
/// All task and event operations are owner-scoped: the owning account id is a
/// mandatory query parameter, so a resource is never addressable by its own
/// id alone.
///
/// # Models
///
/// - `user`: accounts (unique username + password hash)
/// - `task`: tasks with title, optional description, and completion flag
/// - `event`: calendar events with title and date

pub mod event;
pub mod task;
pub mod user;
