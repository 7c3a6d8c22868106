// crates/devdesc-rs-pqa/src/config.rs

use crate::error::PqaError;
use crate::score::Threshold;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings of the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PqaConfig {
    /// Worker threads draining the analysis queue.
    pub workers: usize,
    pub sweep_interval_secs: u64,
    /// Queue every file without metrics when the scheduler starts.
    pub startup_sweep: bool,
    /// Activated in the store when no threshold is active yet.
    pub threshold: Threshold,
}

impl Default for PqaConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            sweep_interval_secs: 24 * 60 * 60,
            startup_sweep: true,
            threshold: Threshold::default(),
        }
    }
}

impl PqaConfig {
    /// Reads a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PqaError> {
        let config: PqaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PqaError> {
        if self.workers == 0 {
            return Err(PqaError::Config("workers must be at least 1".to_string()));
        }
        if self.sweep_interval_secs == 0 {
            return Err(PqaError::Config(
                "sweep_interval_secs must be at least 1".to_string(),
            ));
        }
        self.threshold.validate().map_err(PqaError::Config)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
