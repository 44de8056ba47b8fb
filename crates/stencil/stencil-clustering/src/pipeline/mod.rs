//! Two-pass clustering pipeline: exact grouping → similarity merge → assembly.

pub mod phase1_grouping;
pub mod phase2_merge;
pub mod phase3_assembly;

pub use phase1_grouping::{group_by_skeleton, SkeletonGroup, SkeletonGroups};
pub use phase2_merge::{Cluster, PreparedMerge, SimilarityMerger};
pub use phase3_assembly::{assemble, AssemblyOptions, ClusterSet};
