//! Configuration: one struct per pipeline section, aggregated by
//! [`StencilConfig`]. Every field is optional; `effective_*` accessors hold
//! the compiled defaults.

mod clustering_config;
mod ingest_config;
mod paths_config;
mod report_config;
mod skeleton_config;
mod stencil_config;
mod tuning_config;

pub use clustering_config::ClusteringConfig;
pub use ingest_config::IngestConfig;
pub use paths_config::PathsConfig;
pub use report_config::ReportConfig;
pub use skeleton_config::SkeletonConfig;
pub use stencil_config::{CliOverrides, StencilConfig};
pub use tuning_config::TuningConfig;
