//! Risk classification capability boundary.
//!
//! The engine depends only on the [`RiskClassifier`] trait; the queue and
//! scorer never see model internals, so a rule-based screen, a statistical
//! model, or a learned model can be swapped in without redesign. Output is
//! validated at the boundary: a confidence outside [0, 1] surfaces as a
//! classification error and aborts the submission.

use triage_core::{Classification, RiskLevel, TriageError, VitalsRecord};

/// `classify(vitals) -> (risk_level, confidence)`. Must be deterministic
/// for a fixed model version.
pub trait RiskClassifier: Send + Sync {
    fn classify(&self, vitals: &VitalsRecord) -> Result<Classification, TriageError>;
}

/// Validate classifier output before it reaches the scorer or queue.
pub fn validate_output(c: Classification) -> Result<Classification, TriageError> {
    if !c.confidence.is_finite() || !(0.0..=1.0).contains(&c.confidence) {
        return Err(TriageError::Classification(format!(
            "confidence {} outside [0, 1]",
            c.confidence
        )));
    }
    Ok(c)
}

/// Deterministic rule-based classifier over normalized vitals.
///
/// Counts critical and warning signals against standard early-warning
/// cutoffs: any critical signal puts the patient in the high tier, two or
/// more warnings in medium, otherwise low. Confidence reflects how many
/// signals agree with the tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdClassifier;

impl ThresholdClassifier {
    fn critical_signals(v: &VitalsRecord) -> u32 {
        let mut n = 0;
        if v.heart_rate < 40.0 || v.heart_rate > 130.0 {
            n += 1;
        }
        if v.respiratory_rate < 8.0 || v.respiratory_rate > 30.0 {
            n += 1;
        }
        if v.oxygen_saturation < 90.0 {
            n += 1;
        }
        if v.body_temperature < 35.0 || v.body_temperature > 39.5 {
            n += 1;
        }
        if v.systolic_bp < 90.0 || v.systolic_bp > 180.0 {
            n += 1;
        }
        if v.mean_arterial_pressure < 65.0 {
            n += 1;
        }
        n
    }

    fn warning_signals(v: &VitalsRecord) -> u32 {
        let mut n = 0;
        if (100.0..=130.0).contains(&v.heart_rate) || (40.0..50.0).contains(&v.heart_rate) {
            n += 1;
        }
        if (21.0..=30.0).contains(&v.respiratory_rate) {
            n += 1;
        }
        if (90.0..95.0).contains(&v.oxygen_saturation) {
            n += 1;
        }
        if (38.0..=39.5).contains(&v.body_temperature) {
            n += 1;
        }
        if (140.0..=180.0).contains(&v.systolic_bp) {
            n += 1;
        }
        if v.hrv > 0.0 && v.hrv < 20.0 {
            n += 1;
        }
        n
    }
}

impl RiskClassifier for ThresholdClassifier {
    fn classify(&self, vitals: &VitalsRecord) -> Result<Classification, TriageError> {
        let critical = Self::critical_signals(vitals);
        let warnings = Self::warning_signals(vitals);

        let (risk_level, confidence) = if critical > 0 {
            (RiskLevel::High, (0.7 + 0.1 * f64::from(critical)).min(0.98))
        } else if warnings >= 2 {
            (RiskLevel::Medium, (0.6 + 0.1 * f64::from(warnings)).min(0.9))
        } else if warnings == 1 {
            (RiskLevel::Low, 0.7)
        } else {
            (RiskLevel::Low, 0.9)
        };

        Ok(Classification { risk_level, confidence })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::RawVitals;

    fn vitals(overrides: impl FnOnce(&mut RawVitals)) -> VitalsRecord {
        let mut raw = RawVitals {
            heart_rate: 72.0,
            respiratory_rate: 16.0,
            body_temperature: 36.8,
            oxygen_saturation: 98.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            age: 40.0,
            gender: 0.0,
            weight_kg: 70.0,
            height_m: 1.7,
            hrv: 55.0,
        };
        overrides(&mut raw);
        crate::normalizer::normalize(&raw).unwrap()
    }

    #[test]
    fn healthy_vitals_are_low_risk() {
        let c = ThresholdClassifier.classify(&vitals(|_| {})).unwrap();
        assert_eq!(c.risk_level, RiskLevel::Low);
        assert!(c.confidence >= 0.9);
    }

    #[test]
    fn hypoxia_is_high_risk() {
        let c = ThresholdClassifier
            .classify(&vitals(|v| v.oxygen_saturation = 85.0))
            .unwrap();
        assert_eq!(c.risk_level, RiskLevel::High);
    }

    #[test]
    fn two_warnings_are_medium_risk() {
        let c = ThresholdClassifier
            .classify(&vitals(|v| {
                v.heart_rate = 110.0;
                v.body_temperature = 38.5;
            }))
            .unwrap();
        assert_eq!(c.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn deterministic_for_same_input() {
        let v = vitals(|v| v.heart_rate = 110.0);
        let a = ThresholdClassifier.classify(&v).unwrap();
        let b = ThresholdClassifier.classify(&v).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_confidence_rejected_at_boundary() {
        let bad = Classification { risk_level: RiskLevel::Low, confidence: 1.5 };
        assert!(matches!(
            validate_output(bad),
            Err(TriageError::Classification(_))
        ));
        let nan = Classification { risk_level: RiskLevel::Low, confidence: f64::NAN };
        assert!(validate_output(nan).is_err());
    }
}
