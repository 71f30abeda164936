use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vitals::VitalsRecord;

/// Risk tier assigned by the classifier. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All tiers, ascending by urgency. Used for per-tier tables.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Output of the pluggable risk classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub risk_level: RiskLevel,
    /// Confidence in the classification, always within [0, 1].
    pub confidence: f64,
}

/// One completed assessment: classification, scoring, and the originating
/// vitals. Immutable once created; a priority recompute produces a new
/// `priority_score` via [`QueueEntry`], never by editing this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub risk_level: RiskLevel,
    pub confidence_score: f64,
    pub priority_score: f64,
    /// Estimated wait in whole minutes.
    pub estimated_wait_time: u32,
    pub timestamp: DateTime<Utc>,
    pub vitals: VitalsRecord,
}

/// A queued patient. Owned exclusively by the triage queue, which assigns
/// and maintains `queue_position` (1-based, contiguous).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub patient_id: String,
    pub assessment: AssessmentResult,
    pub queue_position: usize,
}

/// Post-hoc outcome signal fed back to the calibrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub patient_id: String,
    /// Observed wait in minutes.
    pub actual_wait_time: u32,
    /// Patient satisfaction within [0, 1].
    pub satisfaction_score: f64,
    /// Staff/resource utilization within [0, 1]; 0.5 when unknown.
    pub resource_utilization: f64,
}
