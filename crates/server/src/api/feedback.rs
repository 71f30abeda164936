//! Outcome feedback ingestion.
//!
//! Query-parameter based, matching the original intake client. Feedback
//! only adjusts future scoring; the queue itself is never touched.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use triage_core::FeedbackRecord;

use crate::state::AppState;

use super::{ApiError, ErrorResponse};

#[derive(Deserialize, IntoParams)]
pub struct FeedbackParams {
    pub patient_id: String,
    /// Observed wait in minutes.
    pub actual_wait_time: u32,
    /// Patient satisfaction within [0, 1].
    pub satisfaction_score: f64,
    /// Within [0, 1]; falls back to the configured default when omitted.
    pub resource_utilization: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub status: &'static str,
}

/// Record an observed outcome for a previously assessed patient.
#[utoipa::path(
    post,
    path = "/feedback",
    tag = "Feedback",
    params(FeedbackParams),
    responses(
        (status = 200, description = "Feedback recorded", body = FeedbackResponse),
        (status = 422, description = "Unknown patient or score out of range", body = ErrorResponse)
    )
)]
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedbackParams>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let record = FeedbackRecord {
        patient_id: params.patient_id,
        actual_wait_time: params.actual_wait_time,
        satisfaction_score: params.satisfaction_score,
        resource_utilization: params
            .resource_utilization
            .unwrap_or_else(|| state.service.default_resource_utilization()),
    };
    state.service.submit_feedback(&record)?;
    Ok(Json(FeedbackResponse { status: "recorded" }))
}
