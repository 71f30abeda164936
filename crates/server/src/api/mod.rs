//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area; the shared error
//! mapping lives here in mod.rs.

pub mod assessment;
pub mod doc;
pub mod feedback;
pub mod health;
pub mod queue;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use triage_core::TriageError;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Offending field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Engine error → HTTP status mapping.
///
/// Validation and duplicates are caller mistakes; empty-queue is an
/// advisory condition, not a fault; classification failures are 503
/// because retrying is safe (no side effect happened).
pub struct ApiError(pub TriageError);

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TriageError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TriageError::DuplicatePatient(_) => StatusCode::CONFLICT,
            TriageError::EmptyQueue => StatusCode::NOT_FOUND,
            TriageError::Classification(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let field = match &self.0 {
            TriageError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };
        (status, Json(ErrorResponse { error: self.0.to_string(), field })).into_response()
    }
}

// ── Re-exports ───────────────────────────────────────────────────
// Flat `api::foo` import paths for route registration.

pub use assessment::submit_assessment;
pub use feedback::submit_feedback;
pub use health::{config_summary, health, stats};
pub use queue::{clear_queue, get_next_patient, get_queue, update_priorities};
