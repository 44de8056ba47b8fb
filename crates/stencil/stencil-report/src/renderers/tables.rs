//! Cluster and membership tables.

use stencil_core::errors::StencilResult;
use stencil_core::models::{ClusterSummary, MembershipRow};

use super::ArtifactRenderer;
use crate::context::ReportContext;
use crate::tables::{encode_clusters, encode_membership, CLUSTERS_FILE, MEMBERSHIP_FILE};
use crate::writer::RenderedFile;

pub struct TablesRenderer;

impl ArtifactRenderer for TablesRenderer {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn render(&self, ctx: &ReportContext<'_>) -> StencilResult<Vec<RenderedFile>> {
        let summaries: Vec<ClusterSummary> = ctx
            .clusters
            .iter()
            .filter_map(|c| {
                c.representative().map(|rep| ClusterSummary {
                    cluster_id: c.cluster_id,
                    count: c.count,
                    representative_id: rep.id().to_string(),
                    representative_text_raw: rep.text_raw().to_string(),
                })
            })
            .collect();

        let membership: Vec<MembershipRow> = ctx
            .clusters
            .iter()
            .flat_map(|c| {
                c.members.iter().map(move |m| MembershipRow {
                    message_id: m.id().to_string(),
                    cluster_id: c.cluster_id,
                })
            })
            .collect();

        Ok(vec![
            RenderedFile::new(CLUSTERS_FILE, encode_clusters(&summaries)?),
            RenderedFile::new(MEMBERSHIP_FILE, encode_membership(&membership)?),
        ])
    }
}
