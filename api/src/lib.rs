//! HTTP API for the student records backend.
//!
//! The binary in `main.rs` wires MySQL-backed repositories into
//! [`app::create_app`]; integration tests build the same application over
//! the in-memory repositories.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
