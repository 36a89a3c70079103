//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, handlers, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/config.json", get(handlers::config::config_json))
        .route("/analytics", get(handlers::analytics::analytics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
