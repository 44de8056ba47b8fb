//! Threshold exploration: cut one dendrogram at many thresholds and
//! recommend the one whose cluster count best fits a target band.

use serde::Serialize;
use stencil_core::config::TuningConfig;
use stencil_core::constants::TUNING_TOP_SIZES;
use tracing::{debug, info, info_span};

use crate::pipeline::{PreparedMerge, SimilarityMerger, SkeletonGroups};
use crate::stats::{top_sizes, SizeStats};

/// Cluster statistics at one candidate threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdRow {
    pub threshold: f64,
    pub cluster_count: usize,
    pub sizes: Option<SizeStats>,
    /// Largest cluster sizes, descending.
    pub top_sizes: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub threshold: f64,
    pub cluster_count: usize,
    /// False when no threshold landed inside the band and the fallback rule
    /// picked this one.
    pub in_band: bool,
}

/// The full sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exploration {
    pub total_messages: usize,
    pub distinct_skeletons: usize,
    pub target_band: (usize, usize),
    pub rows: Vec<ThresholdRow>,
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Clone)]
pub struct ThresholdExplorer {
    thresholds: Vec<f64>,
    target_band: (usize, usize),
}

impl Default for ThresholdExplorer {
    fn default() -> Self {
        Self::from_config(&TuningConfig::default())
    }
}

impl ThresholdExplorer {
    /// `thresholds` are swept in the order given; callers pass them
    /// ascending.
    pub fn new(thresholds: Vec<f64>, target_band: (usize, usize)) -> Self {
        Self {
            thresholds,
            target_band,
        }
    }

    pub fn from_config(config: &TuningConfig) -> Self {
        Self::new(config.effective_thresholds(), config.effective_target_band())
    }

    /// Vectorize and link once, then cut at every threshold.
    pub fn explore(&self, groups: &SkeletonGroups, merger: &SimilarityMerger) -> Exploration {
        let _span = info_span!("stencil.tune", thresholds = self.thresholds.len()).entered();
        let prepared = merger.prepare(groups);
        self.explore_prepared(groups, &prepared)
    }

    /// Sweep an already prepared merge.
    pub fn explore_prepared(&self, groups: &SkeletonGroups, prepared: &PreparedMerge) -> Exploration {
        let group_sizes = groups.sizes();
        let rows: Vec<ThresholdRow> = self
            .thresholds
            .iter()
            .map(|&threshold| {
                let sizes = prepared.cluster_sizes(&group_sizes, threshold);
                debug!(threshold, clusters = sizes.len(), "threshold evaluated");
                ThresholdRow {
                    threshold,
                    cluster_count: sizes.len(),
                    sizes: SizeStats::from_sizes(&sizes),
                    top_sizes: top_sizes(&sizes, TUNING_TOP_SIZES),
                }
            })
            .collect();

        let recommendation = recommend(&rows, self.target_band);
        match &recommendation {
            Some(r) => info!(
                threshold = r.threshold,
                clusters = r.cluster_count,
                in_band = r.in_band,
                "threshold recommended"
            ),
            None => info!("no threshold recommended"),
        }

        Exploration {
            total_messages: groups.message_count(),
            distinct_skeletons: groups.len(),
            target_band: self.target_band,
            rows,
            recommendation,
        }
    }
}

/// Pick a threshold for the target band `(min, max)`.
///
/// Among rows whose count lies in the band, the one closest to the band
/// midpoint wins, earliest row on ties. Otherwise the earliest row whose
/// count is below `max`. Otherwise none.
pub fn recommend(rows: &[ThresholdRow], (min, max): (usize, usize)) -> Option<Recommendation> {
    let midpoint = (min + max) as f64 / 2.0;

    let mut best: Option<(&ThresholdRow, f64)> = None;
    for row in rows.iter().filter(|r| (min..=max).contains(&r.cluster_count)) {
        let diff = (row.cluster_count as f64 - midpoint).abs();
        if best.map_or(true, |(_, best_diff)| diff < best_diff) {
            best = Some((row, diff));
        }
    }

    if let Some((row, _)) = best {
        return Some(Recommendation {
            threshold: row.threshold,
            cluster_count: row.cluster_count,
            in_band: true,
        });
    }

    rows.iter()
        .find(|r| r.cluster_count < max)
        .map(|row| Recommendation {
            threshold: row.threshold,
            cluster_count: row.cluster_count,
            in_band: false,
        })
}
