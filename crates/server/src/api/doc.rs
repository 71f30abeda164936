//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "triage-queue API",
        version = "0.1.0",
        description = "Priority queue engine for patient triage: vitals in, risk-ordered queue out, with outcome-driven recalibration.",
    ),
    tags(
        (name = "Health", description = "Server readiness, queue stats, and configuration"),
        (name = "Assessment", description = "Vitals submission and risk assessment"),
        (name = "Queue", description = "Ordered queue reads and operator actions"),
        (name = "Feedback", description = "Outcome signals feeding scorer calibration"),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::stats,
        crate::api::health::config_summary,
        crate::api::assessment::submit_assessment,
        crate::api::queue::get_queue,
        crate::api::queue::get_next_patient,
        crate::api::queue::clear_queue,
        crate::api::queue::update_priorities,
        crate::api::feedback::submit_feedback,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::api::health::StatsResponse,
        crate::api::assessment::AssessmentResponse,
        crate::api::assessment::VitalsDetails,
        crate::api::queue::QueuePatient,
        crate::api::queue::ClearResponse,
        crate::api::queue::UpdateResponse,
        crate::api::feedback::FeedbackResponse,
    ))
)]
pub struct ApiDoc;
