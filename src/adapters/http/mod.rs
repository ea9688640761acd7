//! HTTP surface: webhook receiver, status poll, and diagnostics.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{api_router, app_router};
