//! TemplateDiscovery: runs grouping, merge, and assembly as one stage.

use stencil_core::config::ClusteringConfig;
use stencil_core::errors::{StencilError, StencilResult};
use stencil_core::models::NormalizedMessage;
use tracing::{info, info_span};

use crate::pipeline::{
    assemble, group_by_skeleton, AssemblyOptions, ClusterSet, SimilarityMerger, SkeletonGroups,
};

/// Result of one discovery run.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub distinct_skeletons: usize,
    pub threshold: f64,
    pub clusters: ClusterSet,
}

/// The two-pass template discovery pipeline.
#[derive(Debug, Clone)]
pub struct TemplateDiscovery {
    merger: SimilarityMerger,
    threshold: f64,
    options: AssemblyOptions,
}

impl Default for TemplateDiscovery {
    fn default() -> Self {
        Self::from_config(&ClusteringConfig::default())
    }
}

impl TemplateDiscovery {
    pub fn new(merger: SimilarityMerger, threshold: f64, options: AssemblyOptions) -> Self {
        Self {
            merger,
            threshold,
            options,
        }
    }

    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self::new(
            SimilarityMerger::from_config(config),
            config.effective_threshold(),
            AssemblyOptions::from_config(config),
        )
    }

    pub fn merger(&self) -> &SimilarityMerger {
        &self.merger
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Cluster `messages`. An empty corpus is an `EmptyResult` error.
    pub fn discover(&self, messages: Vec<NormalizedMessage>) -> StencilResult<Discovery> {
        let _span = info_span!("stencil.cluster", messages = messages.len()).entered();
        if messages.is_empty() {
            return Err(StencilError::empty("normalize"));
        }

        let groups = group_by_skeleton(messages);
        info!(skeletons = groups.len(), "exact grouping complete");
        self.discover_groups(groups)
    }

    /// Cluster already grouped messages.
    pub fn discover_groups(&self, groups: SkeletonGroups) -> StencilResult<Discovery> {
        if groups.is_empty() {
            return Err(StencilError::empty("grouping"));
        }
        let distinct_skeletons = groups.len();

        let clusters = self.merger.merge(groups, self.threshold);
        let merged = clusters.len();
        let set = assemble(clusters, self.options);
        info!(
            threshold = self.threshold,
            merged,
            retained = set.len(),
            dropped = set.dropped_clusters(),
            "similarity merge complete"
        );

        if set.is_empty() {
            return Err(StencilError::empty("cluster size filter"));
        }

        Ok(Discovery {
            distinct_skeletons,
            threshold: self.threshold,
            clusters: set,
        })
    }
}
