//! Phase 1: exact grouping by skeleton.
//!
//! Groups are kept in first-seen skeleton order; members keep input order.

use std::collections::HashMap;

use stencil_core::models::NormalizedMessage;

/// All messages sharing one exact skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonGroup {
    pub skeleton: String,
    pub members: Vec<NormalizedMessage>,
}

impl SkeletonGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Skeleton groups partitioning one corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonGroups {
    groups: Vec<SkeletonGroup>,
}

impl SkeletonGroups {
    /// Number of distinct skeletons.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkeletonGroup> {
        self.groups.iter()
    }

    /// Distinct skeletons in first-seen order.
    pub fn skeletons(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.skeleton.as_str()).collect()
    }

    /// Member count of each group, in group order.
    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(SkeletonGroup::len).collect()
    }

    /// Total number of messages across all groups.
    pub fn message_count(&self) -> usize {
        self.groups.iter().map(SkeletonGroup::len).sum()
    }

    pub fn into_groups(self) -> Vec<SkeletonGroup> {
        self.groups
    }
}

/// Partition `messages` by exact `text_skeleton`.
pub fn group_by_skeleton(messages: Vec<NormalizedMessage>) -> SkeletonGroups {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SkeletonGroup> = Vec::new();

    for message in messages {
        match index.get(&message.text_skeleton) {
            Some(&i) => groups[i].members.push(message),
            None => {
                index.insert(message.text_skeleton.clone(), groups.len());
                groups.push(SkeletonGroup {
                    skeleton: message.text_skeleton.clone(),
                    members: vec![message],
                });
            }
        }
    }

    SkeletonGroups { groups }
}
