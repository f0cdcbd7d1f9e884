//! HTTP route handlers.
//!
//! Routes are grouped by caching behaviour: static assets get a long
//! Cache-Control, the front page and calculation results are never cached,
//! and the health probe carries no header at all.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod calc;
pub mod extract;
pub mod health;
pub mod home;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, CACHE_CONTROL_STATIC};
use crate::http::static_files::create_static_service;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Front page - always fresh so UI updates show up immediately
    let home_routes = Router::new().route("/", get(home::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ),
    );

    // Calculations - results depend on the loaded wavelength table
    let calc_routes = Router::new()
        .route("/calc_center", post(calc::center))
        .route("/calc_from_start", post(calc::from_start))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    // Static files from the read-only mount
    let static_routes = Router::new()
        .nest_service("/static", create_static_service(&state.config.paths))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    Router::new()
        .merge(home_routes)
        .merge(calc_routes)
        .merge(static_routes)
        .merge(health_routes)
        .with_state(state.clone())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn_with_state(state, request_id_layer))
}
