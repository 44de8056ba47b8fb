use serde::{Deserialize, Serialize};

use crate::models::Placeholder;

/// A skeleton together with the substitutions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonTrace {
    pub skeleton: String,
    /// Rules that matched at least once, in application order.
    pub hits: Vec<RuleHit>,
}

/// Substitutions made by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule: String,
    pub placeholder: Placeholder,
    pub count: usize,
}

/// Turns normalized text into a structural skeleton.
pub trait ISkeletonizer: Send + Sync {
    fn skeletonize(&self, text_norm: &str) -> String;

    /// Skeletonize and report which rules fired.
    fn skeletonize_traced(&self, text_norm: &str) -> SkeletonTrace;
}
