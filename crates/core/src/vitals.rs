use serde::{Deserialize, Serialize};

/// Raw vital-sign submission as it arrives on the wire.
///
/// Field names match the original intake client payload (PascalCase with
/// underscores), so existing front-ends keep working unchanged. Everything
/// arrives as a float; validation and typing happen in the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVitals {
    #[serde(rename = "Heart_Rate")]
    pub heart_rate: f64,
    #[serde(rename = "Respiratory_Rate")]
    pub respiratory_rate: f64,
    #[serde(rename = "Body_Temperature")]
    pub body_temperature: f64,
    #[serde(rename = "Oxygen_Saturation")]
    pub oxygen_saturation: f64,
    #[serde(rename = "Systolic_Blood_Pressure")]
    pub systolic_bp: f64,
    #[serde(rename = "Diastolic_Blood_Pressure")]
    pub diastolic_bp: f64,
    #[serde(rename = "Age")]
    pub age: f64,
    /// 0 = female, 1 = male (original dataset encoding).
    #[serde(rename = "Gender")]
    pub gender: f64,
    #[serde(rename = "Weight_kg")]
    pub weight_kg: f64,
    #[serde(rename = "Height_m")]
    pub height_m: f64,
    /// Heart-rate variability in ms, as measured by the intake device.
    #[serde(rename = "Derived_HRV", default)]
    pub hrv: f64,
}

/// Immutable normalized snapshot of one submission.
///
/// Created once by the normalizer and never mutated afterwards; the derived
/// clinical metrics (BMI, pulse pressure, MAP) are computed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
    pub heart_rate: f64,
    pub respiratory_rate: f64,
    pub body_temperature: f64,
    pub oxygen_saturation: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub age: f64,
    pub gender: u8,
    pub weight_kg: f64,
    pub height_m: f64,
    pub hrv: f64,
    /// weight_kg / height_m²
    pub bmi: f64,
    /// systolic − diastolic
    pub pulse_pressure: f64,
    /// diastolic + pulse_pressure / 3
    pub mean_arterial_pressure: f64,
}
