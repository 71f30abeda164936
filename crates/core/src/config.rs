use std::env;

use serde::{Deserialize, Serialize};

use crate::assessment::RiskLevel;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub scoring: ScoringConfig,
    pub calibration: CalibrationConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            scoring: ScoringConfig::from_env(),
            calibration: CalibrationConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:      {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  scoring:     base=[{}/{}/{}], elderly >= {} (+{}), decay +{} per {}min",
            self.scoring.base_score_low,
            self.scoring.base_score_medium,
            self.scoring.base_score_high,
            self.scoring.elderly_age_threshold,
            self.scoring.elderly_boost,
            self.scoring.decay_increment,
            self.scoring.decay_interval_minutes,
        );
        tracing::info!(
            "  calibration: alpha={}, satisfaction floor={}",
            self.calibration.decay,
            self.calibration.satisfaction_floor,
        );
    }

    /// Return a summary safe for API responses.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "server": { "host": self.server.host, "port": self.server.port },
            "scoring": {
                "base_scores": {
                    "high": self.scoring.base_score_high,
                    "medium": self.scoring.base_score_medium,
                    "low": self.scoring.base_score_low,
                },
                "elderly_age_threshold": self.scoring.elderly_age_threshold,
                "elderly_boost": self.scoring.elderly_boost,
                "decay_interval_minutes": self.scoring.decay_interval_minutes,
                "decay_increment": self.scoring.decay_increment,
                "avg_service_minutes": self.scoring.avg_service_minutes,
                "default_resource_utilization": self.scoring.default_resource_utilization,
            },
            "calibration": {
                "decay": self.calibration.decay,
                "satisfaction_floor": self.calibration.satisfaction_floor,
                "satisfaction_boost": self.calibration.satisfaction_boost,
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("TRIAGE_HOST", "0.0.0.0"),
            port: env_u16("TRIAGE_PORT", 8002),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── Scoring ───────────────────────────────────────────────────

/// Tunable priority-scoring rules. Defaults follow the documented shape
/// of the scoring function; every knob is env-overridable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score_high: f64,
    pub base_score_medium: f64,
    pub base_score_low: f64,
    /// Patients at or above this age get the elderly boost.
    pub elderly_age_threshold: f64,
    pub elderly_boost: f64,
    /// Every full interval waited adds `decay_increment` to the score.
    pub decay_interval_minutes: u32,
    pub decay_increment: f64,
    /// Starting per-tier average service time, before calibration.
    pub avg_service_minutes: f64,
    /// Used when feedback omits resource utilization.
    pub default_resource_utilization: f64,
}

impl ScoringConfig {
    fn from_env() -> Self {
        Self {
            base_score_high: env_f64("BASE_SCORE_HIGH", 100.0),
            base_score_medium: env_f64("BASE_SCORE_MEDIUM", 50.0),
            base_score_low: env_f64("BASE_SCORE_LOW", 10.0),
            elderly_age_threshold: env_f64("ELDERLY_AGE_THRESHOLD", 65.0),
            elderly_boost: env_f64("ELDERLY_BOOST", 10.0),
            decay_interval_minutes: env_u32("DECAY_INTERVAL_MINUTES", 10),
            decay_increment: env_f64("DECAY_INCREMENT", 2.0),
            avg_service_minutes: env_f64("AVG_SERVICE_MINUTES", 15.0),
            default_resource_utilization: env_f64("DEFAULT_RESOURCE_UTILIZATION", 0.5),
        }
    }

    /// Base score for a risk tier.
    pub fn base_score(&self, tier: RiskLevel) -> f64 {
        match tier {
            RiskLevel::High => self.base_score_high,
            RiskLevel::Medium => self.base_score_medium,
            RiskLevel::Low => self.base_score_low,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score_high: 100.0,
            base_score_medium: 50.0,
            base_score_low: 10.0,
            elderly_age_threshold: 65.0,
            elderly_boost: 10.0,
            decay_interval_minutes: 10,
            decay_increment: 2.0,
            avg_service_minutes: 15.0,
            default_resource_utilization: 0.5,
        }
    }
}

// ── Calibration ───────────────────────────────────────────────

/// Feedback-loop parameters for the calibrator's moving averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// EMA smoothing factor for service-time and satisfaction averages.
    pub decay: f64,
    /// When a tier's satisfaction EMA drops below this, its base score
    /// gets a corrective boost in future scoring calls.
    pub satisfaction_floor: f64,
    pub satisfaction_boost: f64,
}

impl CalibrationConfig {
    fn from_env() -> Self {
        Self {
            decay: env_f64("CALIBRATION_DECAY", 0.2),
            satisfaction_floor: env_f64("SATISFACTION_FLOOR", 0.4),
            satisfaction_boost: env_f64("SATISFACTION_BOOST", 5.0),
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            decay: 0.2,
            satisfaction_floor: 0.4,
            satisfaction_boost: 5.0,
        }
    }
}
