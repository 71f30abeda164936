//! HTTP router construction.
//!
//! Assembles routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
///
/// Paths are matched with trailing slashes trimmed; the original intake
/// client calls every endpoint as `/predict/`, `/queue/next/` and so on.
pub fn build_router(state: Arc<AppState>) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(api::health))
        .route("/stats", get(api::stats))
        .route("/config", get(api::config_summary))
        .route("/predict", post(api::submit_assessment))
        .route("/queue", get(api::get_queue))
        .route("/queue/next", get(api::get_next_patient))
        .route("/queue/clear", delete(api::clear_queue))
        .route("/queue/update-priorities", post(api::update_priorities))
        .route("/feedback", post(api::submit_feedback))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()));
    // Must wrap the router itself: route matching happens before any
    // middleware added with `Router::layer` runs.
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
