//! HTTP surface: application wiring and route handlers.

pub mod app;
pub mod routes;

pub use app::{build_app, build_deps, build_searcher, AppState};
