//! `cluster` and `tune`.

use anyhow::Context;
use stencil_clustering::{
    group_by_skeleton, Discovery, SimilarityMerger, TemplateDiscovery, ThresholdExplorer,
};
use stencil_core::config::StencilConfig;
use stencil_core::errors::StencilError;
use stencil_core::models::NormalizedMessage;
use stencil_ingest::read_normalized;
use stencil_report::{render_stats, render_sweep, write_artifacts, ArtifactSet, ReportContext};
use tracing::warn;

/// The normalized records, plus the summary line for any that were skipped.
fn load_normalized(config: &StencilConfig) -> anyhow::Result<(Vec<NormalizedMessage>, String)> {
    let path = config.paths.effective_normalized();
    let loaded =
        read_normalized(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut note = String::new();
    if !loaded.is_clean() {
        warn!(
            skipped = loaded.skipped_count(),
            path = %path.display(),
            "unreadable normalized records skipped"
        );
        note = skipped_line(loaded.skipped_count(), &path.display().to_string());
    }
    Ok((loaded.records, note))
}

pub(crate) fn skipped_line(skipped: usize, source: &str) -> String {
    format!("Skipped {skipped} unreadable records in {source}\n")
}

/// Cluster `messages` and write the tables and example files. Returns the
/// statistics text along with the discovery for later stages.
pub fn discover(
    config: &StencilConfig,
    messages: Vec<NormalizedMessage>,
) -> anyhow::Result<(String, Discovery)> {
    let discovery = TemplateDiscovery::from_config(&config.clustering)
        .discover(messages)
        .context("clustering failed")?;
    let out_dir = config.paths.effective_out_dir();
    let ctx = ReportContext::from_cluster_set(&discovery.clusters);
    let written = write_artifacts(ArtifactSet::Cluster, &ctx, config, &out_dir)
        .with_context(|| format!("failed to write cluster artifacts to {}", out_dir.display()))?;

    let mut out = render_stats(&discovery.clusters.stats());
    out.push_str(&format!(
        "\n{} distinct skeletons merged at threshold {:.2}\n",
        discovery.distinct_skeletons, discovery.threshold
    ));
    out.push_str(&format!("Wrote {} files to {}\n", written.len(), out_dir.display()));
    Ok((out, discovery))
}

pub fn cluster(config: &StencilConfig) -> anyhow::Result<String> {
    let (messages, mut out) = load_normalized(config)?;
    out.push_str(&discover(config, messages)?.0);
    Ok(out)
}

pub fn tune(config: &StencilConfig) -> anyhow::Result<String> {
    let (messages, mut out) = load_normalized(config)?;
    if messages.is_empty() {
        return Err(StencilError::empty("normalize")).context("threshold sweep failed");
    }
    let groups = group_by_skeleton(messages);
    let merger = SimilarityMerger::from_config(&config.clustering);
    let exploration = ThresholdExplorer::from_config(&config.tuning).explore(&groups, &merger);
    out.push_str(&render_sweep(&exploration));
    Ok(out)
}
