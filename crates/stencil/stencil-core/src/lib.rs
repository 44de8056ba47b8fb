//! # stencil-core
//!
//! Foundation crate for the Stencil template discovery pipeline.
//! Defines the message data model, placeholder vocabulary, errors, config,
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StencilConfig;
pub use errors::{Loaded, StencilError, StencilResult};
pub use models::{
    ClusterId, ClusterSummary, MembershipRow, Message, NormalizedMessage, Placeholder,
};
