//! The read-only view every renderer works from.
//!
//! A context is built either straight from a fresh [`ClusterSet`] or from
//! the cluster tables written by an earlier run plus the normalized records.

use std::collections::HashMap;

use stencil_clustering::ClusterSet;
use stencil_core::models::{ClusterId, ClusterSummary, MembershipRow, NormalizedMessage};
use tracing::warn;

/// One cluster as seen by the renderers.
#[derive(Debug, Clone)]
pub struct ClusterView<'a> {
    pub cluster_id: ClusterId,
    pub count: usize,
    /// Members in membership order. The first is the representative.
    pub members: Vec<&'a NormalizedMessage>,
}

impl<'a> ClusterView<'a> {
    pub fn representative(&self) -> Option<&'a NormalizedMessage> {
        self.members.first().copied()
    }

    /// Skeleton of the representative, `"N/A"` when no member resolved.
    pub fn skeleton(&self) -> &'a str {
        self.representative()
            .map_or("N/A", |m| m.text_skeleton.as_str())
    }

    pub fn head(&self, limit: usize) -> &[&'a NormalizedMessage] {
        &self.members[..limit.min(self.members.len())]
    }
}

#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Rank order: count descending.
    pub clusters: Vec<ClusterView<'a>>,
}

impl<'a> ReportContext<'a> {
    pub fn from_cluster_set(set: &'a ClusterSet) -> Self {
        let clusters = set
            .clusters()
            .iter()
            .map(|c| ClusterView {
                cluster_id: c.id,
                count: c.count(),
                members: c.members.iter().collect(),
            })
            .collect();
        Self { clusters }
    }

    /// Rebuild from tables. Clusters keep the table's rank order; membership
    /// rows naming an unknown message are dropped with a warning.
    pub fn from_tables(
        summaries: &[ClusterSummary],
        membership: &[MembershipRow],
        messages: &'a [NormalizedMessage],
    ) -> Self {
        let by_id: HashMap<&str, &'a NormalizedMessage> =
            messages.iter().map(|m| (m.id(), m)).collect();

        let mut members: HashMap<ClusterId, Vec<&'a NormalizedMessage>> = HashMap::new();
        let mut unresolved = 0usize;
        for row in membership {
            match by_id.get(row.message_id.as_str()) {
                Some(m) => members.entry(row.cluster_id).or_default().push(*m),
                None => unresolved += 1,
            }
        }
        if unresolved > 0 {
            warn!(unresolved, "membership rows reference unknown messages");
        }

        let mut clusters: Vec<ClusterView<'a>> = summaries
            .iter()
            .map(|s| ClusterView {
                cluster_id: s.cluster_id,
                count: s.count,
                members: members.remove(&s.cluster_id).unwrap_or_default(),
            })
            .collect();
        clusters.sort_by(|a, b| b.count.cmp(&a.count));
        Self { clusters }
    }

    pub fn total_messages(&self) -> usize {
        self.clusters.iter().map(|c| c.count).sum()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
