//! # stencil-report
//!
//! Artifacts produced from a clustering: the cluster and membership tables,
//! per-cluster example files, the Markdown report, YAML template stubs, and
//! the plain-text statistics and sweep summaries.
//!
//! Every stage renders all of its files in memory first, then writes each
//! one atomically. Per-cluster files left over from an earlier run are
//! removed once the new set is written.

pub mod context;
pub mod fields;
pub mod renderers;
pub mod sweep;
pub mod tables;
pub mod writer;

use std::path::{Path, PathBuf};

use stencil_core::config::StencilConfig;
use stencil_core::errors::{StencilError, StencilResult};
use stencil_core::models::{ClusterSummary, MembershipRow, NormalizedMessage};
use stencil_ingest::read_normalized;
use tracing::{info, info_span};

pub use context::{ClusterView, ReportContext};
pub use renderers::{render_all, renderers_for, ArtifactRenderer, ArtifactSet};
pub use sweep::{render_stats, render_sweep};
pub use writer::{prune_stale, write_rendered, OwnedFiles, RenderedFile};

/// Render one artifact group and write its files under `root`.
pub fn write_artifacts(
    set: ArtifactSet,
    ctx: &ReportContext<'_>,
    config: &StencilConfig,
    root: &Path,
) -> StencilResult<Vec<PathBuf>> {
    let _span = info_span!("stencil.report", artifacts = ?set, root = %root.display()).entered();
    let renderers = renderers_for(set, config);
    let files = render_all(&renderers, ctx)?;
    let written = write_rendered(root, &files)?;

    let owned: Vec<_> = renderers.iter().filter_map(|r| r.owned_files()).collect();
    let removed = prune_stale(root, &owned, &files)?;
    info!(files = written.len(), stale_removed = removed.len(), "artifacts written");
    Ok(written)
}

/// A clustering reloaded from disk: the tables plus the normalized records
/// they refer to.
#[derive(Debug)]
pub struct StoredRun {
    pub summaries: Vec<ClusterSummary>,
    pub membership: Vec<MembershipRow>,
    pub messages: Vec<NormalizedMessage>,
    /// Rows and records skipped while loading.
    pub skipped: usize,
}

impl StoredRun {
    /// Load `clusters.csv` and `cluster_membership.csv` from `out_dir` and
    /// the normalized records from `normalized`.
    pub fn load(out_dir: &Path, normalized: &Path) -> StencilResult<Self> {
        let messages = read_normalized(normalized)?;
        let summaries = tables::read_clusters(&out_dir.join(tables::CLUSTERS_FILE))?;
        let membership = tables::read_membership(&out_dir.join(tables::MEMBERSHIP_FILE))?;
        let skipped =
            messages.skipped_count() + summaries.skipped_count() + membership.skipped_count();

        if summaries.records.is_empty() {
            return Err(StencilError::empty("cluster table load"));
        }

        Ok(Self {
            summaries: summaries.records,
            membership: membership.records,
            messages: messages.records,
            skipped,
        })
    }

    pub fn context(&self) -> ReportContext<'_> {
        ReportContext::from_tables(&self.summaries, &self.membership, &self.messages)
    }
}
