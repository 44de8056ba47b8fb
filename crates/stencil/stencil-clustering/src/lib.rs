//! # stencil-clustering
//!
//! Two-pass template clustering: exact skeleton grouping, then a TF-IDF
//! character n-gram, average-linkage merge cut at a distance threshold.
//! The threshold explorer sweeps candidate thresholds over one dendrogram.

pub mod algorithms;
pub mod engine;
pub mod explorer;
pub mod pipeline;
pub mod stats;

pub use engine::{Discovery, TemplateDiscovery};
pub use explorer::{Exploration, Recommendation, ThresholdExplorer, ThresholdRow};
pub use pipeline::{
    assemble, group_by_skeleton, AssemblyOptions, Cluster, ClusterSet, SimilarityMerger,
    SkeletonGroups,
};
pub use stats::{ClusterStats, SizeStats};
