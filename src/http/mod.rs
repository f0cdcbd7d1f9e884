//! HTTP server module.
//!
//! Plain HTTP only; TLS is terminated by the reverse proxy in front of the
//! container. The server includes:
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Wavelength table hot-reload via SIGHUP
//! - Static file serving from the mounted directory

mod server;
mod shutdown;
pub mod static_files;

pub use server::{start_server, ServerError};
