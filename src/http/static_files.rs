//! Static file serving from the read-only static mount.

use tower_http::services::ServeDir;

use crate::config::PathsConfig;

/// Create the `/static` file service.
///
/// Directory requests do not fall back to `index.html`; the front page is
/// served by its own route at `/`.
pub fn create_static_service(paths: &PathsConfig) -> ServeDir {
    ServeDir::new(&paths.static_dir).append_index_html_on_directories(false)
}
