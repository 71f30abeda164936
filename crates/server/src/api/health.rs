//! Health, queue stats, and configuration endpoints.
//!
//! SRP: server readiness and operational metrics.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

// ── Health ────────────────────────────────────────────────────────

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub queue_size: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        queue_size: state.service.get_queue().len(),
    })
}

// ── Stats ─────────────────────────────────────────────────────────

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub avg_priority: f64,
    pub feedback_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_utilization: Option<f64>,
}

/// Queue depth and per-tier composition, for the dashboard queue page.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Health",
    responses((status = 200, description = "Queue composition", body = StatsResponse))
)]
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let s = state.service.queue_stats();
    Json(StatsResponse {
        total: s.total,
        high: s.high,
        medium: s.medium,
        low: s.low,
        avg_priority: s.avg_priority,
        feedback_count: s.feedback_count,
        resource_utilization: s.resource_utilization,
    })
}

// ── Config ────────────────────────────────────────────────────────

/// Redacted view of the active configuration.
#[utoipa::path(
    get,
    path = "/config",
    tag = "Health",
    responses((status = 200, description = "Active scoring and calibration settings", body = Object))
)]
pub async fn config_summary(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.config.redacted_summary())
}
