//! formdrop-server: HTTP backend for form submissions
//!
//! Accepts multipart form posts (name, email, message and an image file),
//! stores the image in an upload directory and the submission row in
//! PostgreSQL, and exposes list/delete endpoints over JSON.

pub mod db;
pub mod http;
pub mod models;
pub mod uploads;

pub use http::{build_router, run_server, AppState, ServerConfig};
