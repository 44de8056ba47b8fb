//! Data model shared by every pipeline stage.

mod cluster;
mod message;
mod normalized;
mod placeholder;

pub use cluster::{ClusterId, ClusterSummary, MembershipRow};
pub use message::Message;
pub use normalized::NormalizedMessage;
pub use placeholder::Placeholder;
