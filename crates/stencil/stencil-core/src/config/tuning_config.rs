use serde::{Deserialize, Serialize};

use crate::constants;

/// Threshold sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TuningConfig {
    /// Candidate thresholds, ascending.
    pub thresholds: Vec<f64>,
    /// Lower bound of the target cluster-count band. Default: 20.
    pub target_min: Option<usize>,
    /// Upper bound of the target cluster-count band. Default: 60.
    pub target_max: Option<usize>,
}

impl TuningConfig {
    pub fn effective_thresholds(&self) -> Vec<f64> {
        if self.thresholds.is_empty() {
            constants::DEFAULT_TUNING_THRESHOLDS.to_vec()
        } else {
            self.thresholds.clone()
        }
    }

    /// Returns the inclusive target band `(min, max)`.
    pub fn effective_target_band(&self) -> (usize, usize) {
        (
            self.target_min
                .unwrap_or(constants::DEFAULT_TARGET_MIN_CLUSTERS),
            self.target_max
                .unwrap_or(constants::DEFAULT_TARGET_MAX_CLUSTERS),
        )
    }
}
