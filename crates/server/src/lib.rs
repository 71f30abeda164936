//! HTTP binding for the triage queue engine.
//!
//! One valid realization of the transport-agnostic operation surface:
//! axum routes over [`triage_engine::TriageService`], with OpenAPI docs
//! served at `/docs`.

pub mod api;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
