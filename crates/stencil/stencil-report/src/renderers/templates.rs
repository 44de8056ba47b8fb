//! Starter YAML template stubs, one per cluster, for hand-written parsers.

use serde::{Deserialize, Serialize};
use stencil_core::config::StencilConfig;
use stencil_core::errors::{StencilError, StencilResult};
use stencil_skeleton::detect_language;
use tracing::debug;

use super::ArtifactRenderer;
use crate::context::{ClusterView, ReportContext};
use crate::fields::{parse_notes, template_fields};
use crate::writer::{OwnedFiles, RenderedFile};

/// Placeholder until someone classifies the template.
pub const UNKNOWN_MESSAGE_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateStub {
    pub id: String,
    pub message_type: String,
    /// `ar`, `en`, `mixed`, or `unknown`.
    pub language: String,
    pub skeleton: String,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    pub parse_notes: String,
    pub cluster_info: ClusterInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub cluster_id: usize,
    pub message_count: usize,
    pub sample_messages: Vec<String>,
}

pub struct TemplateRenderer {
    prefix: String,
    samples: usize,
}

impl TemplateRenderer {
    pub fn new(prefix: impl Into<String>, samples: usize) -> Self {
        Self {
            prefix: prefix.into(),
            samples,
        }
    }

    pub fn from_config(config: &StencilConfig) -> Self {
        Self::new(
            config.report.effective_template_prefix(),
            config.report.effective_template_samples(),
        )
    }

    /// `None` for a cluster with no resolvable members.
    pub fn stub(&self, cluster: &ClusterView<'_>) -> Option<TemplateStub> {
        let representative = cluster.representative()?;
        let skeleton = representative.text_skeleton.clone();
        let fields = template_fields(&skeleton);

        Some(TemplateStub {
            id: format!("{}_{:03}", self.prefix, cluster.cluster_id),
            message_type: UNKNOWN_MESSAGE_TYPE.to_string(),
            language: detect_language(representative.text_raw()).code().to_string(),
            parse_notes: parse_notes(&skeleton),
            skeleton,
            required_fields: fields.required,
            optional_fields: fields.optional,
            cluster_info: ClusterInfo {
                cluster_id: cluster.cluster_id,
                message_count: cluster.count,
                sample_messages: cluster
                    .head(self.samples)
                    .iter()
                    .map(|m| m.text_raw().to_string())
                    .collect(),
            },
        })
    }
}

pub fn template_file_name(cluster_id: usize) -> String {
    format!("template_{cluster_id:03}.yaml")
}

impl ArtifactRenderer for TemplateRenderer {
    fn name(&self) -> &'static str {
        "templates"
    }

    fn owned_files(&self) -> Option<OwnedFiles> {
        Some(OwnedFiles {
            dir: "",
            prefix: "template_",
            extension: "yaml",
        })
    }

    fn render(&self, ctx: &ReportContext<'_>) -> StencilResult<Vec<RenderedFile>> {
        let mut files = Vec::with_capacity(ctx.len());
        for cluster in &ctx.clusters {
            let Some(stub) = self.stub(cluster) else {
                debug!(cluster = cluster.cluster_id, "no members, template skipped");
                continue;
            };
            let yaml =
                serde_yaml::to_string(&stub).map_err(|e| StencilError::serialization("YAML", e))?;
            files.push(RenderedFile::new(template_file_name(cluster.cluster_id), yaml));
        }
        Ok(files)
    }
}
