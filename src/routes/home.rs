//! Front page handler.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Serve `index.html` from the static directory.
///
/// Read on every request so a remounted static volume takes effect at once.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.paths.index_path();
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::FrontPageMissing(path)),
        Err(e) => Err(AppError::Io(e)),
    }
}
