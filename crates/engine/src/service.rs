//! Transport-agnostic service facade.
//!
//! [`TriageService`] owns the single serialization boundary around the
//! queue (mutations are mutually exclusive, reads see consistent
//! snapshots) and a separate one around the calibrator, so feedback
//! ingestion never contends with the request path. Every operation is
//! short and non-blocking once its lock is held.

use std::sync::RwLock;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use triage_core::{
    AssessmentResult, Config, FeedbackRecord, QueueEntry, RawVitals, RiskLevel, TriageError,
};

use crate::calibrator::FeedbackCalibrator;
use crate::classifier::{validate_output, RiskClassifier};
use crate::normalizer::normalize;
use crate::queue::TriageQueue;
use crate::scorer::PriorityScorer;

/// Operational snapshot of the queue, for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct QueueStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub avg_priority: f64,
    pub feedback_count: u64,
    pub resource_utilization: Option<f64>,
}

pub struct TriageService {
    scorer: PriorityScorer,
    classifier: Box<dyn RiskClassifier>,
    queue: RwLock<TriageQueue>,
    calibrator: RwLock<FeedbackCalibrator>,
    default_resource_utilization: f64,
}

impl TriageService {
    pub fn new(config: &Config, classifier: Box<dyn RiskClassifier>) -> Self {
        Self {
            scorer: PriorityScorer::new(config.scoring.clone()),
            classifier,
            queue: RwLock::new(TriageQueue::new()),
            calibrator: RwLock::new(FeedbackCalibrator::new(
                config.calibration.clone(),
                &config.scoring,
            )),
            default_resource_utilization: config.scoring.default_resource_utilization,
        }
    }

    /// Used by the transport layer to fill an omitted utilization value.
    pub fn default_resource_utilization(&self) -> f64 {
        self.default_resource_utilization
    }

    /// Full submission flow: normalize → classify → score → enqueue.
    ///
    /// A classification failure aborts before any queue mutation, so the
    /// caller can safely retry.
    pub fn submit_assessment(&self, raw: &RawVitals) -> Result<QueueEntry, TriageError> {
        let vitals = normalize(raw)?;
        let classification = validate_output(self.classifier.classify(&vitals)?)?;
        let params = self.calibrator.read().expect("calibrator lock poisoned").params();

        let mut queue = self.queue.write().expect("queue lock poisoned");
        let outcome = self.scorer.score(
            classification.risk_level,
            classification.confidence,
            vitals.age,
            0,
            queue.len() + 1,
            &params,
        );
        let assessment = AssessmentResult {
            risk_level: classification.risk_level,
            confidence_score: classification.confidence,
            priority_score: outcome.priority_score,
            estimated_wait_time: outcome.estimated_wait_time,
            timestamp: Utc::now(),
            vitals,
        };

        let patient_id = Uuid::new_v4().to_string();
        let entry = queue.insert(patient_id, assessment, &self.scorer, &params)?;

        // Register before releasing the queue lock: once the entry is
        // visible to readers, feedback for it must already resolve. The
        // read paths never hold the calibrator lock across a queue
        // acquisition, so taking it here cannot deadlock.
        self.calibrator
            .write()
            .expect("calibrator lock poisoned")
            .register(&entry.patient_id, entry.assessment.risk_level);
        drop(queue);

        info!(
            "Queued patient {} ({}, score {:.1}, position {})",
            entry.patient_id,
            entry.assessment.risk_level,
            entry.assessment.priority_score,
            entry.queue_position
        );
        Ok(entry)
    }

    /// Position-ascending snapshot of the queue.
    pub fn get_queue(&self) -> Vec<QueueEntry> {
        self.queue.read().expect("queue lock poisoned").list()
    }

    pub fn peek_next_patient(&self) -> Result<QueueEntry, TriageError> {
        self.queue.read().expect("queue lock poisoned").peek_next()
    }

    /// Pop the position-1 patient.
    pub fn get_next_patient(&self) -> Result<QueueEntry, TriageError> {
        let params = self.calibrator.read().expect("calibrator lock poisoned").params();
        let entry = self
            .queue
            .write()
            .expect("queue lock poisoned")
            .pop_next(&self.scorer, &params)?;
        info!(
            "Serving patient {} ({}, waited since {})",
            entry.patient_id, entry.assessment.risk_level, entry.assessment.timestamp
        );
        Ok(entry)
    }

    /// Drop all waiting patients. Returns how many were removed.
    pub fn clear_queue(&self) -> usize {
        let n = self.queue.write().expect("queue lock poisoned").clear();
        info!("Queue cleared ({n} entries dropped)");
        n
    }

    /// Batch re-score against elapsed wait time. Explicit rather than a
    /// background task so ordering changes stay auditable and on-demand.
    pub fn update_priorities(&self) {
        let params = self.calibrator.read().expect("calibrator lock poisoned").params();
        let mut queue = self.queue.write().expect("queue lock poisoned");
        queue.recompute_all(&self.scorer, &params, Utc::now());
        info!("Priorities recomputed for {} entries", queue.len());
    }

    /// Record an outcome. Affects future scoring only; never touches the
    /// queue.
    pub fn submit_feedback(&self, feedback: &FeedbackRecord) -> Result<(), TriageError> {
        self.calibrator
            .write()
            .expect("calibrator lock poisoned")
            .record(feedback)
    }

    pub fn queue_stats(&self) -> QueueStats {
        let entries = self.get_queue();
        let count = |tier: RiskLevel| {
            entries.iter().filter(|e| e.assessment.risk_level == tier).count()
        };
        let avg_priority = if entries.is_empty() {
            0.0
        } else {
            entries.iter().map(|e| e.assessment.priority_score).sum::<f64>()
                / entries.len() as f64
        };
        let calibrator = self.calibrator.read().expect("calibrator lock poisoned");
        QueueStats {
            total: entries.len(),
            high: count(RiskLevel::High),
            medium: count(RiskLevel::Medium),
            low: count(RiskLevel::Low),
            avg_priority,
            feedback_count: calibrator.feedback_count(),
            resource_utilization: calibrator.utilization(),
        }
    }
}
