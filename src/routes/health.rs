//! Health check endpoint for container orchestration.
//!
//! Liveness probe only: returns 200 whenever the process can answer HTTP.
//! It touches no state, so a broken data table never fails the probe.

use axum::Json;
use serde_json::{json, Value};

/// `GET /healthz`: always answers `{"ok": true}`.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}
