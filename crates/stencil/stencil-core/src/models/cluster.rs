use serde::{Deserialize, Serialize};

/// Cluster identifier assigned by the merge. Carries no meaning across runs.
pub type ClusterId = usize;

/// One row of the cluster table consumed by reporting collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster_id: ClusterId,
    pub count: usize,
    pub representative_id: String,
    pub representative_text_raw: String,
}

/// One row of the membership table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRow {
    pub message_id: String,
    pub cluster_id: ClusterId,
}
