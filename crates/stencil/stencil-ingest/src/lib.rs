//! # stencil-ingest
//!
//! Getting messages into the pipeline: the phone-message export parser with
//! its sender filter and de-duplication, the JSON Lines record store, and
//! the normalize stage that attaches canonical text and skeletons.

pub mod export;
pub mod stages;
pub mod store;

pub use export::{filter_messages, parse_export, ExportSource, IngestOptions, IngestOutcome};
pub use stages::{run_ingest, run_normalize, NormalizeOutcome};
pub use store::{read_jsonl, read_messages, read_normalized, write_atomic, write_jsonl, JsonlSource};
