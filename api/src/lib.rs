//! # Keyward API
//!
//! Thin actix-web adapter over the core services: bearer token
//! authentication, permission guards, and the session endpoints.

pub mod app;
pub mod directory;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
