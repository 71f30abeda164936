//! Priority scoring: converts a classification plus patient attributes
//! and elapsed wait into a priority score and a wait-time estimate.
//!
//! The scoring pipeline: tier base score → confidence adjustment →
//! elderly boost → time-decay. Total for valid input; outputs are always
//! finite and non-negative.

use serde::Serialize;

use triage_core::{config::ScoringConfig, RiskLevel};

/// A value per risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerTier<T> {
    pub low: T,
    pub medium: T,
    pub high: T,
}

impl<T: Copy> PerTier<T> {
    pub fn uniform(value: T) -> Self {
        Self { low: value, medium: value, high: value }
    }

    pub fn get(&self, tier: RiskLevel) -> T {
        match tier {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    pub fn get_mut(&mut self, tier: RiskLevel) -> &mut T {
        match tier {
            RiskLevel::Low => &mut self.low,
            RiskLevel::Medium => &mut self.medium,
            RiskLevel::High => &mut self.high,
        }
    }
}

/// Scorer inputs that the feedback calibrator adjusts over time.
///
/// Snapshotted before each scoring call so calibration never races a
/// submission: updates affect future calls only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibratedParams {
    /// Rolling average service time per tier, in minutes.
    pub avg_service_minutes: PerTier<f64>,
    /// Additive base-score correction per tier (0 when satisfaction is
    /// healthy).
    pub base_adjust: PerTier<f64>,
}

impl CalibratedParams {
    /// Uncalibrated starting point from static config.
    pub fn initial(config: &ScoringConfig) -> Self {
        Self {
            avg_service_minutes: PerTier::uniform(config.avg_service_minutes),
            base_adjust: PerTier::uniform(0.0),
        }
    }
}

/// Scoring outcome for one patient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub priority_score: f64,
    /// Estimated wait in whole minutes.
    pub estimated_wait_time: u32,
}

/// Encapsulates the tunable priority rules.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    config: ScoringConfig,
}

impl PriorityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one patient.
    ///
    /// `waited_minutes` is elapsed time since submission (drives the
    /// anti-starvation decay); `position` is the queue position used for
    /// the wait estimate (1-based).
    pub fn score(
        &self,
        tier: RiskLevel,
        confidence: f64,
        age: f64,
        waited_minutes: i64,
        position: usize,
        params: &CalibratedParams,
    ) -> ScoreOutcome {
        let base = self.config.base_score(tier) + params.base_adjust.get(tier);

        // Low-confidence classifications are pulled toward neutral so an
        // overconfident outlier cannot dominate the ordering.
        let mut score = base * (0.5 + 0.5 * confidence.clamp(0.0, 1.0));

        if age >= self.config.elderly_age_threshold {
            score += self.config.elderly_boost;
        }

        let interval = i64::from(self.config.decay_interval_minutes.max(1));
        let full_intervals = waited_minutes.max(0) / interval;
        score += full_intervals as f64 * self.config.decay_increment;

        ScoreOutcome {
            priority_score: score.max(0.0),
            estimated_wait_time: self.estimate_wait(tier, position, params),
        }
    }

    /// Wait estimate for a given position: `position * avg service time`
    /// for the patient's tier.
    pub fn estimate_wait(
        &self,
        tier: RiskLevel,
        position: usize,
        params: &CalibratedParams,
    ) -> u32 {
        let avg = params.avg_service_minutes.get(tier).max(0.0);
        let est = position as f64 * avg;
        if est.is_finite() {
            est.round() as u32
        } else {
            0
        }
    }
}
