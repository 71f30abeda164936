//! Triage priority queue engine.
//!
//! A submission flows normalizer → classifier → scorer → queue. Operator
//! actions (pop, recompute, clear) act on the queue directly, and outcome
//! feedback flows through the calibrator into future scoring calls. The
//! [`TriageService`] facade owns the serialization boundary around the
//! queue and calibrator; everything underneath is synchronous and pure.

pub mod calibrator;
pub mod classifier;
pub mod normalizer;
pub mod queue;
pub mod scorer;
pub mod service;

pub use calibrator::FeedbackCalibrator;
pub use classifier::{RiskClassifier, ThresholdClassifier};
pub use normalizer::normalize;
pub use queue::TriageQueue;
pub use scorer::{CalibratedParams, PerTier, PriorityScorer};
pub use service::{QueueStats, TriageService};
