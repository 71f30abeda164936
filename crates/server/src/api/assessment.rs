//! Submission endpoint: vitals in, stored assessment out.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use triage_core::{QueueEntry, RawVitals, VitalsRecord};

use crate::state::AppState;

use super::{ApiError, ErrorResponse};

/// Wire form of one stored assessment, echoing the normalized vitals in
/// `details` the way the original intake client expects.
#[derive(Serialize, ToSchema)]
pub struct AssessmentResponse {
    pub patient_id: String,
    pub risk_level: String,
    pub confidence_score: f64,
    pub priority_score: f64,
    pub queue_position: usize,
    pub estimated_wait_time: u32,
    pub timestamp: DateTime<Utc>,
    pub details: VitalsDetails,
}

#[derive(Serialize, ToSchema)]
pub struct VitalsDetails {
    pub heart_rate: f64,
    pub respiratory_rate: f64,
    pub body_temperature: f64,
    pub oxygen_saturation: f64,
    pub systolic_blood_pressure: f64,
    pub diastolic_blood_pressure: f64,
    pub age: f64,
    pub gender: u8,
    pub weight: f64,
    pub height: f64,
    pub derived_hrv: f64,
    pub derived_pulse_pressure: f64,
    pub derived_bmi: f64,
    pub derived_map: f64,
}

impl From<&VitalsRecord> for VitalsDetails {
    fn from(v: &VitalsRecord) -> Self {
        Self {
            heart_rate: v.heart_rate,
            respiratory_rate: v.respiratory_rate,
            body_temperature: v.body_temperature,
            oxygen_saturation: v.oxygen_saturation,
            systolic_blood_pressure: v.systolic_bp,
            diastolic_blood_pressure: v.diastolic_bp,
            age: v.age,
            gender: v.gender,
            weight: v.weight_kg,
            height: v.height_m,
            derived_hrv: v.hrv,
            derived_pulse_pressure: v.pulse_pressure,
            derived_bmi: v.bmi,
            derived_map: v.mean_arterial_pressure,
        }
    }
}

impl From<QueueEntry> for AssessmentResponse {
    fn from(entry: QueueEntry) -> Self {
        Self {
            patient_id: entry.patient_id,
            risk_level: entry.assessment.risk_level.to_string(),
            confidence_score: entry.assessment.confidence_score,
            priority_score: entry.assessment.priority_score,
            queue_position: entry.queue_position,
            estimated_wait_time: entry.assessment.estimated_wait_time,
            timestamp: entry.assessment.timestamp,
            details: (&entry.assessment.vitals).into(),
        }
    }
}

/// Run the full submission flow and return the queued assessment.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "Assessment",
    request_body(content = Object, description = "Raw vital signs (Heart_Rate, Respiratory_Rate, Body_Temperature, Oxygen_Saturation, Systolic_Blood_Pressure, Diastolic_Blood_Pressure, Age, Gender, Weight_kg, Height_m, Derived_HRV)"),
    responses(
        (status = 200, description = "Assessment stored and queued", body = AssessmentResponse),
        (status = 422, description = "Vitals failed validation", body = ErrorResponse),
        (status = 503, description = "Classifier unavailable, safe to retry", body = ErrorResponse)
    )
)]
pub async fn submit_assessment(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawVitals>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let entry = state.service.submit_assessment(&raw)?;
    Ok(Json(entry.into()))
}
