//! Cluster size statistics.

use std::collections::BTreeMap;

use serde::Serialize;

/// Summary of a list of cluster sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeStats {
    pub mean: f64,
    /// Mean of the two middle values for an even count.
    pub median: f64,
    pub min: usize,
    pub max: usize,
}

impl SizeStats {
    /// `None` for an empty list.
    pub fn from_sizes(sizes: &[usize]) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }
        let mut sorted = sizes.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let mean = sorted.iter().sum::<usize>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };
        Some(Self {
            mean,
            median,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Corpus-level clustering statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterStats {
    pub total_messages: usize,
    pub cluster_count: usize,
    pub sizes: Option<SizeStats>,
    /// Cluster size -> number of clusters of that size.
    pub distribution: BTreeMap<usize, usize>,
}

impl ClusterStats {
    pub fn new(total_messages: usize, sizes: &[usize]) -> Self {
        let mut distribution = BTreeMap::new();
        for &size in sizes {
            *distribution.entry(size).or_insert(0) += 1;
        }
        Self {
            total_messages,
            cluster_count: sizes.len(),
            sizes: SizeStats::from_sizes(sizes),
            distribution,
        }
    }
}

/// The `n` largest sizes, descending.
pub fn top_sizes(sizes: &[usize], n: usize) -> Vec<usize> {
    let mut sorted = sizes.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(n);
    sorted
}
