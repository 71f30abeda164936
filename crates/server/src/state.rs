use std::sync::Arc;

use triage_core::Config;
use triage_engine::{ThresholdClassifier, TriageService};

pub struct AppState {
    pub service: TriageService,
    pub config: Config,
}

impl AppState {
    /// Build the shared state with the default rule-based classifier.
    pub fn from_config(config: Config) -> Arc<Self> {
        let service = TriageService::new(&config, Box::new(ThresholdClassifier));
        Arc::new(Self { service, config })
    }
}
