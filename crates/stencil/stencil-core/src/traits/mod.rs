//! Seams between the core and its collaborators.

mod message_source;
mod skeletonizer;

pub use message_source::IMessageSource;
pub use skeletonizer::{ISkeletonizer, RuleHit, SkeletonTrace};
