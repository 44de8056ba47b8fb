//! Per-cluster example files: `cluster_examples/cluster_<id>.txt`.

use stencil_clustering::algorithms::keyterms::top_terms;
use stencil_core::config::StencilConfig;
use stencil_core::constants::KEY_TERM_MAX_FEATURES;
use stencil_core::errors::StencilResult;

use super::ArtifactRenderer;
use crate::context::{ClusterView, ReportContext};
use crate::writer::{OwnedFiles, RenderedFile};

pub const EXAMPLES_DIR: &str = "cluster_examples";

const RULE_WIDTH: usize = 80;

pub struct ExamplesRenderer {
    example_limit: usize,
    key_terms: usize,
}

impl ExamplesRenderer {
    pub fn new(example_limit: usize, key_terms: usize) -> Self {
        Self {
            example_limit,
            key_terms,
        }
    }

    pub fn from_config(config: &StencilConfig) -> Self {
        Self::new(
            config.clustering.effective_example_limit(),
            config.report.effective_key_terms(),
        )
    }

    /// Render one cluster's example file.
    pub fn render_cluster(&self, cluster: &ClusterView<'_>) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let examples = cluster.head(self.example_limit);
        let mut out = String::new();

        out.push_str(&format!("Cluster {}\n", cluster.cluster_id));
        out.push_str(&format!("Count: {}\n", cluster.count));
        out.push_str(&format!("{rule}\n\n"));

        out.push_str(&format!("SKELETON:\n{}\n\n", cluster.skeleton()));
        out.push_str(&format!("{rule}\n\n"));

        out.push_str(&format!("RAW MESSAGE EXAMPLES (up to {}):\n\n", self.example_limit));
        for (i, m) in examples.iter().enumerate() {
            out.push_str(&format!("Example {} (ID: {}):\n", i + 1, m.id()));
            out.push_str(&format!("{}\n\n", m.text_raw()));
        }
        out.push_str(&format!("{rule}\n\n"));

        out.push_str(&format!("SKELETON EXAMPLES (up to {}):\n\n", self.example_limit));
        for (i, m) in examples.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, m.text_skeleton));
        }
        out.push_str(&format!("\n{rule}\n\n"));

        out.push_str("TOP DISTINGUISHING TERMS:\n\n");
        let docs: Vec<&str> = cluster.members.iter().map(|m| m.text_norm.as_str()).collect();
        for (term, score) in top_terms(&docs, self.key_terms, KEY_TERM_MAX_FEATURES) {
            out.push_str(&format!("  {term}: {score:.4}\n"));
        }
        out
    }
}

impl ArtifactRenderer for ExamplesRenderer {
    fn name(&self) -> &'static str {
        "examples"
    }

    fn owned_files(&self) -> Option<OwnedFiles> {
        Some(OwnedFiles {
            dir: EXAMPLES_DIR,
            prefix: "cluster_",
            extension: "txt",
        })
    }

    fn render(&self, ctx: &ReportContext<'_>) -> StencilResult<Vec<RenderedFile>> {
        Ok(ctx
            .clusters
            .iter()
            .map(|c| {
                RenderedFile::new(
                    format!("{EXAMPLES_DIR}/cluster_{}.txt", c.cluster_id),
                    self.render_cluster(c),
                )
            })
            .collect())
    }
}
