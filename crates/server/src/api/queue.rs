//! Operator actions against the queue: list, pop-next, clear, recompute.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use triage_core::QueueEntry;

use crate::state::AppState;

use super::{ApiError, ErrorResponse};

/// Queue-page view of one waiting patient (no vitals echo).
#[derive(Serialize, ToSchema)]
pub struct QueuePatient {
    pub patient_id: String,
    pub risk_level: String,
    pub confidence_score: f64,
    pub priority_score: f64,
    pub queue_position: usize,
    pub estimated_wait_time: u32,
    pub timestamp: DateTime<Utc>,
}

impl From<QueueEntry> for QueuePatient {
    fn from(entry: QueueEntry) -> Self {
        Self {
            patient_id: entry.patient_id,
            risk_level: entry.assessment.risk_level.to_string(),
            confidence_score: entry.assessment.confidence_score,
            priority_score: entry.assessment.priority_score,
            queue_position: entry.queue_position,
            estimated_wait_time: entry.assessment.estimated_wait_time,
            timestamp: entry.assessment.timestamp,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ClearResponse {
    pub cleared: usize,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateResponse {
    pub updated: usize,
}

/// Position-ascending snapshot of the waiting queue.
#[utoipa::path(
    get,
    path = "/queue",
    tag = "Queue",
    responses(
        (status = 200, description = "Waiting patients, position ascending", body = Vec<QueuePatient>)
    )
)]
pub async fn get_queue(State(state): State<Arc<AppState>>) -> Json<Vec<QueuePatient>> {
    let entries = state.service.get_queue();
    Json(entries.into_iter().map(Into::into).collect())
}

/// Pop the highest-priority patient.
#[utoipa::path(
    get,
    path = "/queue/next",
    tag = "Queue",
    responses(
        (status = 200, description = "Patient removed from the head of the queue", body = QueuePatient),
        (status = 404, description = "Queue is empty", body = ErrorResponse)
    )
)]
pub async fn get_next_patient(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QueuePatient>, ApiError> {
    let entry = state.service.get_next_patient()?;
    Ok(Json(entry.into()))
}

/// Remove all waiting patients. Irreversible.
#[utoipa::path(
    delete,
    path = "/queue/clear",
    tag = "Queue",
    responses(
        (status = 200, description = "Queue emptied", body = ClearResponse)
    )
)]
pub async fn clear_queue(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    Json(ClearResponse { cleared: state.service.clear_queue() })
}

/// Re-score every waiting patient against elapsed wait time.
#[utoipa::path(
    post,
    path = "/queue/update-priorities",
    tag = "Queue",
    responses(
        (status = 200, description = "Priorities recomputed", body = UpdateResponse)
    )
)]
pub async fn update_priorities(State(state): State<Arc<AppState>>) -> Json<UpdateResponse> {
    state.service.update_priorities();
    Json(UpdateResponse { updated: state.service.get_queue().len() })
}
