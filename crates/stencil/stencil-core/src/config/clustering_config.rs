use serde::{Deserialize, Serialize};

use crate::constants;

/// Similarity merge and cluster assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Cosine-distance cutoff. Lower is stricter. Default: 0.3.
    pub threshold: Option<f64>,
    /// Clusters smaller than this are left out of the tables. Default: 1.
    pub min_cluster_size: Option<usize>,
    /// Smallest character n-gram. Default: 3.
    pub ngram_min: Option<usize>,
    /// Largest character n-gram. Default: 5.
    pub ngram_max: Option<usize>,
    /// Members exposed per cluster as examples. Default: 10.
    pub example_limit: Option<usize>,
}

impl ClusteringConfig {
    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(constants::DEFAULT_THRESHOLD)
    }

    pub fn effective_min_cluster_size(&self) -> usize {
        self.min_cluster_size
            .unwrap_or(constants::DEFAULT_MIN_CLUSTER_SIZE)
    }

    /// Returns the inclusive n-gram range.
    pub fn effective_ngram_range(&self) -> (usize, usize) {
        (
            self.ngram_min.unwrap_or(constants::DEFAULT_NGRAM_MIN),
            self.ngram_max.unwrap_or(constants::DEFAULT_NGRAM_MAX),
        )
    }

    pub fn effective_example_limit(&self) -> usize {
        self.example_limit
            .unwrap_or(constants::DEFAULT_EXAMPLE_LIMIT)
    }
}
