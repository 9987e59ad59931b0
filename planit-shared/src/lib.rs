//! # PlanIt Shared Library
//!
//! Shared types and business logic for the PlanIt task/calendar API.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, token service, and the request auth gateway
//! - `models`: database models with owner-scoped CRUD
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the PlanIt shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
