//! Spectrum calculator: a DWDM flex-grid channel planner served over HTTP.
//!
//! The [`grid`] module holds the calculation core. Everything else wires it
//! into an axum service: configuration, shared state, routes, request
//! tracing and the server lifecycle.

pub mod config;
pub mod error;
pub mod grid;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
