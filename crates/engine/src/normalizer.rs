//! Vital-sign validation and derived clinical metrics.
//!
//! Pure and deterministic: the same raw input always yields the same
//! [`VitalsRecord`], and invalid input fails naming the offending field
//! without any side effect.

use triage_core::{RawVitals, TriageError, VitalsRecord};

/// Physiologically plausible bounds per field, inclusive.
const HEART_RATE_RANGE: (f64, f64) = (20.0, 300.0);
const RESPIRATORY_RATE_RANGE: (f64, f64) = (4.0, 80.0);
const BODY_TEMPERATURE_RANGE: (f64, f64) = (30.0, 45.0);
const OXYGEN_SATURATION_RANGE: (f64, f64) = (0.0, 100.0);
const SYSTOLIC_RANGE: (f64, f64) = (50.0, 300.0);
const DIASTOLIC_RANGE: (f64, f64) = (20.0, 200.0);
const AGE_RANGE: (f64, f64) = (0.0, 130.0);
const WEIGHT_RANGE: (f64, f64) = (1.0, 500.0);
const HEIGHT_RANGE: (f64, f64) = (0.3, 2.5);
const HRV_RANGE: (f64, f64) = (0.0, 500.0);

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<f64, TriageError> {
    if !value.is_finite() {
        return Err(TriageError::validation(field, "must be a finite number"));
    }
    if value < min || value > max {
        return Err(TriageError::validation(
            field,
            format!("{value} out of range [{min}, {max}]"),
        ));
    }
    Ok(value)
}

/// Validate a raw submission and compute the derived metrics.
pub fn normalize(raw: &RawVitals) -> Result<VitalsRecord, TriageError> {
    let heart_rate = check_range("heart_rate", raw.heart_rate, HEART_RATE_RANGE)?;
    let respiratory_rate =
        check_range("respiratory_rate", raw.respiratory_rate, RESPIRATORY_RATE_RANGE)?;
    let body_temperature =
        check_range("body_temperature", raw.body_temperature, BODY_TEMPERATURE_RANGE)?;
    let oxygen_saturation =
        check_range("oxygen_saturation", raw.oxygen_saturation, OXYGEN_SATURATION_RANGE)?;
    let systolic_bp = check_range("systolic_bp", raw.systolic_bp, SYSTOLIC_RANGE)?;
    let diastolic_bp = check_range("diastolic_bp", raw.diastolic_bp, DIASTOLIC_RANGE)?;
    let age = check_range("age", raw.age, AGE_RANGE)?;
    let weight_kg = check_range("weight_kg", raw.weight_kg, WEIGHT_RANGE)?;
    let height_m = check_range("height_m", raw.height_m, HEIGHT_RANGE)?;
    let hrv = check_range("hrv", raw.hrv, HRV_RANGE)?;

    let gender = if raw.gender == 0.0 {
        0
    } else if raw.gender == 1.0 {
        1
    } else {
        return Err(TriageError::validation("gender", "must be 0 or 1"));
    };

    let pulse_pressure = systolic_bp - diastolic_bp;
    if pulse_pressure < 0.0 {
        return Err(TriageError::validation(
            "pulse_pressure",
            format!("systolic ({systolic_bp}) below diastolic ({diastolic_bp})"),
        ));
    }

    Ok(VitalsRecord {
        heart_rate,
        respiratory_rate,
        body_temperature,
        oxygen_saturation,
        systolic_bp,
        diastolic_bp,
        age,
        gender,
        weight_kg,
        height_m,
        hrv,
        bmi: weight_kg / (height_m * height_m),
        pulse_pressure,
        mean_arterial_pressure: diastolic_bp + pulse_pressure / 3.0,
    })
}
