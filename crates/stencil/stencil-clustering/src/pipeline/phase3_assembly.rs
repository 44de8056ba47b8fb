//! Phase 3: assemble the ranked cluster set.
//!
//! Clusters are ranked by descending member count, ties by ascending id.
//! Empty clusters and clusters below the minimum size are dropped.

use stencil_core::config::ClusteringConfig;
use stencil_core::models::{ClusterId, ClusterSummary, MembershipRow, NormalizedMessage};

use super::phase2_merge::Cluster;
use crate::stats::ClusterStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub min_cluster_size: usize,
    pub example_limit: usize,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self::from_config(&ClusteringConfig::default())
    }
}

impl AssemblyOptions {
    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self {
            min_cluster_size: config.effective_min_cluster_size(),
            example_limit: config.effective_example_limit(),
        }
    }
}

/// Final clusters in rank order.
#[derive(Debug, Clone)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
    total_messages: usize,
    dropped_clusters: usize,
    example_limit: usize,
}

/// Rank `clusters`, applying the minimum-size filter.
pub fn assemble(clusters: Vec<Cluster>, options: AssemblyOptions) -> ClusterSet {
    let total_messages = clusters.iter().map(Cluster::count).sum();
    let before = clusters.iter().filter(|c| !c.is_empty()).count();

    let mut kept: Vec<Cluster> = clusters
        .into_iter()
        .filter(|c| !c.is_empty() && c.count() >= options.min_cluster_size)
        .collect();
    kept.sort_by(|a, b| b.count().cmp(&a.count()).then(a.id.cmp(&b.id)));

    ClusterSet {
        dropped_clusters: before - kept.len(),
        clusters: kept,
        total_messages,
        example_limit: options.example_limit,
    }
}

impl ClusterSet {
    /// Clusters in rank order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Messages that entered assembly, including those in dropped clusters.
    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    /// Messages in retained clusters.
    pub fn retained_messages(&self) -> usize {
        self.clusters.iter().map(Cluster::count).sum()
    }

    /// Non-empty clusters removed by the minimum-size filter.
    pub fn dropped_clusters(&self) -> usize {
        self.dropped_clusters
    }

    pub fn example_limit(&self) -> usize {
        self.example_limit
    }

    /// The first `example_limit` members of `cluster`.
    pub fn examples<'a>(&self, cluster: &'a Cluster) -> &'a [NormalizedMessage] {
        cluster.examples(self.example_limit)
    }

    /// Cluster table rows in rank order.
    pub fn summaries(&self) -> Vec<ClusterSummary> {
        self.clusters
            .iter()
            .filter_map(|c| {
                c.representative().map(|rep| ClusterSummary {
                    cluster_id: c.id,
                    count: c.count(),
                    representative_id: rep.id().to_string(),
                    representative_text_raw: rep.text_raw().to_string(),
                })
            })
            .collect()
    }

    /// Membership rows, clusters in rank order, members in member order.
    pub fn membership(&self) -> Vec<MembershipRow> {
        self.clusters
            .iter()
            .flat_map(|c| {
                c.members.iter().map(move |m| MembershipRow {
                    message_id: m.id().to_string(),
                    cluster_id: c.id,
                })
            })
            .collect()
    }

    pub fn stats(&self) -> ClusterStats {
        let sizes: Vec<usize> = self.clusters.iter().map(Cluster::count).collect();
        ClusterStats::new(self.total_messages, &sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stencil_core::models::Message;

    fn cluster(id: ClusterId, ids: &[&str]) -> Cluster {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Cluster {
            id,
            skeletons: vec![format!("s{id}")],
            members: ids
                .iter()
                .map(|m| {
                    NormalizedMessage::new(
                        Message::new(*m, "SAB", at, format!("raw {m}")),
                        String::new(),
                        format!("s{id}"),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn ranks_by_count_then_id() {
        let set = assemble(
            vec![cluster(0, &["a"]), cluster(1, &["b", "c"]), cluster(2, &["d", "e"])],
            AssemblyOptions::default(),
        );
        let order: Vec<ClusterId> = set.clusters().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn min_size_filter_drops_small_clusters() {
        let set = assemble(
            vec![cluster(0, &["a"]), cluster(1, &["b", "c"])],
            AssemblyOptions {
                min_cluster_size: 2,
                example_limit: 10,
            },
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped_clusters(), 1);
        assert_eq!(set.total_messages(), 3);
        assert_eq!(set.retained_messages(), 2);
    }

    #[test]
    fn empty_clusters_are_dropped_silently() {
        let set = assemble(vec![cluster(0, &[])], AssemblyOptions::default());
        assert!(set.is_empty());
        assert_eq!(set.dropped_clusters(), 0);
    }

    #[test]
    fn summary_uses_first_member() {
        let set = assemble(vec![cluster(4, &["x", "y"])], AssemblyOptions::default());
        let summaries = set.summaries();
        assert_eq!(
            summaries,
            vec![ClusterSummary {
                cluster_id: 4,
                count: 2,
                representative_id: "x".into(),
                representative_text_raw: "raw x".into(),
            }]
        );
    }

    #[test]
    fn membership_covers_every_retained_member() {
        let set = assemble(
            vec![cluster(0, &["a"]), cluster(1, &["b", "c"])],
            AssemblyOptions::default(),
        );
        let rows: Vec<(String, ClusterId)> = set
            .membership()
            .into_iter()
            .map(|r| (r.message_id, r.cluster_id))
            .collect();
        assert_eq!(
            rows,
            vec![("b".into(), 1), ("c".into(), 1), ("a".into(), 0)]
        );
    }

    #[test]
    fn examples_respect_limit() {
        let set = assemble(
            vec![cluster(0, &["a", "b", "c"])],
            AssemblyOptions {
                min_cluster_size: 1,
                example_limit: 2,
            },
        );
        assert_eq!(set.examples(&set.clusters()[0]).len(), 2);
        assert!(set.get(0).is_some());
        assert!(set.get(9).is_none());
    }

    #[test]
    fn stats_reflect_retained_clusters() {
        let set = assemble(
            vec![cluster(0, &["a"]), cluster(1, &["b", "c", "d"])],
            AssemblyOptions::default(),
        );
        let stats = set.stats();
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.cluster_count, 2);
        assert_eq!(stats.sizes.unwrap().median, 2.0);
    }
}
