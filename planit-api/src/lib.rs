//! # PlanIt API Server Library
//!
//! Core functionality for the PlanIt task/calendar API server.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: environment-based configuration
//! - `error`: error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
