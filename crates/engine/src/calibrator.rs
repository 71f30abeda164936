//! Outcome feedback calibration.
//!
//! Ingests post-hoc signals (actual wait, satisfaction, resource
//! utilization) and maintains the rolling estimates the scorer reads:
//! per-tier average service time, and a corrective base-score boost for
//! tiers whose satisfaction trends low. Updates only ever affect future
//! scoring calls; existing queue entries change solely through an
//! explicit recompute.

use indexmap::IndexMap;
use tracing::{debug, info};

use triage_core::{
    config::{CalibrationConfig, ScoringConfig},
    FeedbackRecord, RiskLevel, TriageError,
};

use crate::scorer::{CalibratedParams, PerTier};

/// Oldest registrations are evicted past this size, bounding memory on a
/// long-running service. Feedback that arrives later than this many
/// subsequent submissions is rejected as unknown.
const ROSTER_CAP: usize = 10_000;

#[derive(Debug)]
pub struct FeedbackCalibrator {
    config: CalibrationConfig,
    /// Patient id → tier in registration order, recorded at submission so
    /// feedback can be attributed after the patient has left the queue.
    roster: IndexMap<String, RiskLevel>,
    service_time_ema: PerTier<f64>,
    satisfaction_ema: PerTier<Option<f64>>,
    utilization_ema: Option<f64>,
    feedback_count: u64,
}

impl FeedbackCalibrator {
    pub fn new(config: CalibrationConfig, scoring: &ScoringConfig) -> Self {
        Self {
            config,
            roster: IndexMap::new(),
            service_time_ema: PerTier::uniform(scoring.avg_service_minutes),
            satisfaction_ema: PerTier::uniform(None),
            utilization_ema: None,
            feedback_count: 0,
        }
    }

    /// Register a submission so later feedback can resolve its tier.
    pub fn register(&mut self, patient_id: &str, tier: RiskLevel) {
        self.roster.insert(patient_id.to_string(), tier);
        while self.roster.len() > ROSTER_CAP {
            self.roster.shift_remove_index(0);
        }
    }

    pub fn feedback_count(&self) -> u64 {
        self.feedback_count
    }

    pub fn utilization(&self) -> Option<f64> {
        self.utilization_ema
    }

    /// Current scorer inputs. Snapshot semantics: the returned value is
    /// detached from subsequent `record` calls.
    pub fn params(&self) -> CalibratedParams {
        let mut base_adjust = PerTier::uniform(0.0);
        for tier in RiskLevel::ALL {
            if let Some(sat) = self.satisfaction_ema.get(tier) {
                if sat < self.config.satisfaction_floor {
                    *base_adjust.get_mut(tier) = self.config.satisfaction_boost;
                }
            }
        }
        CalibratedParams { avg_service_minutes: self.service_time_ema, base_adjust }
    }

    /// Ingest one outcome record. Malformed input fails with a validation
    /// error and leaves every estimate untouched.
    pub fn record(&mut self, feedback: &FeedbackRecord) -> Result<(), TriageError> {
        check_unit("satisfaction_score", feedback.satisfaction_score)?;
        check_unit("resource_utilization", feedback.resource_utilization)?;
        let tier = *self
            .roster
            .get(&feedback.patient_id)
            .ok_or_else(|| {
                TriageError::validation("patient_id", format!("unknown patient {}", feedback.patient_id))
            })?;

        let alpha = self.config.decay;
        let service = self.service_time_ema.get_mut(tier);
        *service = alpha * f64::from(feedback.actual_wait_time) + (1.0 - alpha) * *service;

        let sat = self.satisfaction_ema.get_mut(tier);
        *sat = Some(match *sat {
            Some(prev) => alpha * feedback.satisfaction_score + (1.0 - alpha) * prev,
            None => feedback.satisfaction_score,
        });

        self.utilization_ema = Some(match self.utilization_ema {
            Some(prev) => alpha * feedback.resource_utilization + (1.0 - alpha) * prev,
            None => feedback.resource_utilization,
        });

        self.feedback_count += 1;
        debug!(
            "Feedback for {} ({}): wait={}min satisfaction={:.2}",
            feedback.patient_id, tier, feedback.actual_wait_time, feedback.satisfaction_score
        );
        if self.satisfaction_ema.get(tier).is_some_and(|s| s < self.config.satisfaction_floor) {
            info!(
                "Satisfaction for tier {} below {:.2}, base-score boost active",
                tier, self.config.satisfaction_floor
            );
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), TriageError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(TriageError::validation(field, format!("{value} out of range [0, 1]")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibrator() -> FeedbackCalibrator {
        FeedbackCalibrator::new(CalibrationConfig::default(), &ScoringConfig::default())
    }

    fn feedback(patient_id: &str, wait: u32, satisfaction: f64) -> FeedbackRecord {
        FeedbackRecord {
            patient_id: patient_id.to_string(),
            actual_wait_time: wait,
            satisfaction_score: satisfaction,
            resource_utilization: 0.5,
        }
    }

    #[test]
    fn service_time_moves_toward_observed_wait() {
        let mut c = calibrator();
        c.register("p1", RiskLevel::High);

        // Default 15min, alpha 0.2, observed 45 → 0.2*45 + 0.8*15 = 21.
        c.record(&feedback("p1", 45, 0.8)).unwrap();
        let avg = c.params().avg_service_minutes.get(RiskLevel::High);
        assert!((avg - 21.0).abs() < 1e-9, "avg = {avg}");

        // Other tiers untouched.
        assert!((c.params().avg_service_minutes.get(RiskLevel::Low) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn low_satisfaction_trend_activates_boost() {
        let mut c = calibrator();
        c.register("p1", RiskLevel::Low);

        c.record(&feedback("p1", 20, 0.1)).unwrap();
        let params = c.params();
        assert!((params.base_adjust.get(RiskLevel::Low) - 5.0).abs() < 1e-9);
        assert_eq!(params.base_adjust.get(RiskLevel::High), 0.0);
    }

    #[test]
    fn healthy_satisfaction_keeps_adjust_at_zero() {
        let mut c = calibrator();
        c.register("p1", RiskLevel::Medium);
        c.record(&feedback("p1", 20, 0.9)).unwrap();
        assert_eq!(c.params().base_adjust.get(RiskLevel::Medium), 0.0);
    }

    #[test]
    fn unknown_patient_rejected_without_corrupting_state() {
        let mut c = calibrator();
        let before = c.params();
        let err = c.record(&feedback("ghost", 30, 0.5)).unwrap_err();
        assert!(matches!(err, TriageError::Validation { field, .. } if field == "patient_id"));
        assert_eq!(c.params(), before);
        assert_eq!(c.feedback_count(), 0);
    }

    #[test]
    fn out_of_unit_scores_rejected() {
        let mut c = calibrator();
        c.register("p1", RiskLevel::Low);
        let mut fb = feedback("p1", 30, 1.5);
        assert!(c.record(&fb).is_err());
        fb.satisfaction_score = 0.5;
        fb.resource_utilization = -0.1;
        assert!(c.record(&fb).is_err());
        assert_eq!(c.feedback_count(), 0);
    }

    #[test]
    fn roster_evicts_oldest_past_cap() {
        let mut c = calibrator();
        for i in 0..=ROSTER_CAP {
            c.register(&format!("p{i}"), RiskLevel::Low);
        }

        // p0 was evicted; the newest registration still resolves.
        assert!(c.record(&feedback("p0", 10, 0.5)).is_err());
        c.record(&feedback(&format!("p{ROSTER_CAP}"), 10, 0.5)).unwrap();
        assert_eq!(c.feedback_count(), 1);
    }

    #[test]
    fn params_snapshot_is_detached() {
        let mut c = calibrator();
        c.register("p1", RiskLevel::High);
        let snapshot = c.params();
        c.record(&feedback("p1", 60, 0.2)).unwrap();
        // The earlier snapshot still reflects pre-feedback values.
        assert!((snapshot.avg_service_minutes.get(RiskLevel::High) - 15.0).abs() < 1e-9);
    }
}
