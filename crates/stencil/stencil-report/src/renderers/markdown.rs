//! `cluster_report.md`: every cluster in rank order with its fields,
//! skeleton, and a few examples.

use stencil_core::config::StencilConfig;
use stencil_core::errors::StencilResult;

use super::ArtifactRenderer;
use crate::context::ReportContext;
use crate::fields::report_fields;
use crate::writer::RenderedFile;

pub const REPORT_FILE: &str = "cluster_report.md";

pub struct MarkdownRenderer {
    examples: usize,
}

impl MarkdownRenderer {
    pub fn new(examples: usize) -> Self {
        Self { examples }
    }

    pub fn from_config(config: &StencilConfig) -> Self {
        Self::new(config.report.effective_report_examples())
    }

    pub fn render_report(&self, ctx: &ReportContext<'_>) -> String {
        let total = ctx.total_messages();
        let mut out = String::new();

        out.push_str("# SMS Template Discovery Report\n\n");
        out.push_str(&format!("**Total Messages:** {}\n", thousands(total)));
        out.push_str(&format!("**Total Clusters:** {}\n\n", ctx.len()));
        out.push_str("---\n\n");

        for (rank, cluster) in ctx.clusters.iter().enumerate() {
            let percent = if total == 0 {
                0.0
            } else {
                cluster.count as f64 * 100.0 / total as f64
            };
            let skeleton = cluster.skeleton();
            let fields = report_fields(skeleton);
            let fields = if fields.is_empty() {
                "none".to_string()
            } else {
                fields.join(", ")
            };

            out.push_str(&format!("## Cluster {} (Rank #{})\n\n", cluster.cluster_id, rank + 1));
            out.push_str(&format!(
                "- **Count:** {} messages ({percent:.1}%)\n",
                thousands(cluster.count)
            ));
            out.push_str(&format!("- **Detected Fields:** {fields}\n\n"));

            out.push_str("### Skeleton\n\n");
            out.push_str(&format!("```\n{skeleton}\n```\n\n"));

            out.push_str(&format!(
                "### Representative Messages (showing up to {})\n\n",
                self.examples
            ));
            for (i, m) in cluster.head(self.examples).iter().enumerate() {
                out.push_str(&format!("**Example {}:**\n\n", i + 1));
                out.push_str(&format!("```\n{}\n```\n\n", m.text_raw()));
            }

            out.push_str("---\n\n");
        }
        out
    }
}

impl ArtifactRenderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, ctx: &ReportContext<'_>) -> StencilResult<Vec<RenderedFile>> {
        Ok(vec![RenderedFile::new(REPORT_FILE, self.render_report(ctx))])
    }
}

/// `1234567` -> `1,234,567`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
