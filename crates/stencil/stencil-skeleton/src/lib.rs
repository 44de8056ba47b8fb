//! # stencil-skeleton
//!
//! Character-level normalization and the ordered placeholder rules that turn
//! a message into its template skeleton.

pub mod annotate;
pub mod engine;
pub mod normalizer;
pub mod patterns;
pub mod script;

pub use annotate::{annotate, annotate_all};
pub use engine::{skeletonize, SkeletonExtractor};
pub use normalizer::normalize;
pub use script::{detect_language, Language};
