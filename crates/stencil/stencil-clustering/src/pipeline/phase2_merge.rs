//! Phase 2: merge similar skeleton groups.
//!
//! Distinct skeletons are vectorized as character n-gram TF-IDF rows, their
//! pairwise cosine distances feed an average-linkage dendrogram, and the
//! dendrogram is cut at the distance threshold. Lower thresholds are
//! stricter and give more, smaller clusters.

use stencil_core::config::ClusteringConfig;
use stencil_core::models::{ClusterId, NormalizedMessage};
use tracing::debug;

use super::phase1_grouping::SkeletonGroups;
use crate::algorithms::linkage::{average_linkage, Dendrogram};
use crate::algorithms::similarity::pairwise_cosine_distances;
use crate::algorithms::tfidf::TfidfVectorizer;

/// A set of messages judged to share one template: a union of whole
/// skeleton groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: ClusterId,
    /// Distinct skeletons merged into this cluster, first-seen order.
    pub skeletons: Vec<String>,
    /// Members grouped by skeleton in first-seen order, input order within.
    pub members: Vec<NormalizedMessage>,
}

impl Cluster {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The first member encountered.
    pub fn representative(&self) -> Option<&NormalizedMessage> {
        self.members.first()
    }

    /// Up to `limit` members in member order.
    pub fn examples(&self, limit: usize) -> &[NormalizedMessage] {
        &self.members[..limit.min(self.members.len())]
    }
}

/// Vectorizes skeletons and builds the dendrogram.
#[derive(Debug, Clone)]
pub struct SimilarityMerger {
    vectorizer: TfidfVectorizer,
}

impl Default for SimilarityMerger {
    fn default() -> Self {
        Self::from_config(&ClusteringConfig::default())
    }
}

impl SimilarityMerger {
    pub fn new(ngram_min: usize, ngram_max: usize) -> Self {
        Self {
            vectorizer: TfidfVectorizer::char_ngrams(ngram_min, ngram_max),
        }
    }

    pub fn from_config(config: &ClusteringConfig) -> Self {
        let (min_n, max_n) = config.effective_ngram_range();
        Self::new(min_n, max_n)
    }

    /// Compute everything that does not depend on the threshold.
    ///
    /// With zero or one distinct skeleton there is nothing to compare and no
    /// dendrogram is built.
    pub fn prepare(&self, groups: &SkeletonGroups) -> PreparedMerge {
        let n_groups = groups.len();
        if n_groups <= 1 {
            return PreparedMerge {
                n_groups,
                dendrogram: None,
            };
        }

        let skeletons = groups.skeletons();
        let matrix = self.vectorizer.fit_transform(&skeletons);
        let distances = pairwise_cosine_distances(&matrix.rows);
        let dendrogram = average_linkage(&distances);
        debug!(
            skeletons = n_groups,
            features = matrix.features.len(),
            "skeleton dendrogram built"
        );

        PreparedMerge {
            n_groups,
            dendrogram: Some(dendrogram),
        }
    }

    /// Merge `groups` into clusters at `threshold`.
    pub fn merge(&self, groups: SkeletonGroups, threshold: f64) -> Vec<Cluster> {
        let prepared = self.prepare(&groups);
        prepared.materialize(groups, threshold)
    }
}

/// Threshold-independent merge state: one dendrogram, cut many times.
#[derive(Debug, Clone)]
pub struct PreparedMerge {
    n_groups: usize,
    dendrogram: Option<Dendrogram>,
}

impl PreparedMerge {
    pub fn dendrogram(&self) -> Option<&Dendrogram> {
        self.dendrogram.as_ref()
    }

    /// Cluster id of each skeleton group, in group order.
    pub fn labels(&self, threshold: f64) -> Vec<ClusterId> {
        match &self.dendrogram {
            Some(dendrogram) => dendrogram.cut(threshold),
            None => vec![0; self.n_groups],
        }
    }

    /// Number of clusters at `threshold`. The degenerate case is always one
    /// cluster, even when it is empty.
    pub fn cluster_count(&self, threshold: f64) -> usize {
        match &self.dendrogram {
            Some(dendrogram) => dendrogram.cluster_count(threshold),
            None => 1,
        }
    }

    /// Member count of each cluster at `threshold`, indexed by cluster id.
    pub fn cluster_sizes(&self, group_sizes: &[usize], threshold: f64) -> Vec<usize> {
        let mut sizes = vec![0usize; self.cluster_count(threshold)];
        for (label, size) in self.labels(threshold).into_iter().zip(group_sizes) {
            sizes[label] += size;
        }
        sizes
    }

    /// Move the groups' messages into clusters cut at `threshold`.
    pub fn materialize(&self, groups: SkeletonGroups, threshold: f64) -> Vec<Cluster> {
        let labels = self.labels(threshold);
        let mut clusters: Vec<Cluster> = (0..self.cluster_count(threshold))
            .map(|id| Cluster {
                id,
                skeletons: Vec::new(),
                members: Vec::new(),
            })
            .collect();

        for (group, label) in groups.into_groups().into_iter().zip(labels) {
            let cluster = &mut clusters[label];
            cluster.skeletons.push(group.skeleton);
            cluster.members.extend(group.members);
        }
        clusters
    }
}
