//! The ingest and normalize stages: load, transform, and persist records.

use std::path::Path;

use stencil_core::errors::{StencilError, StencilResult};
use stencil_core::models::NormalizedMessage;
use stencil_core::traits::{IMessageSource, ISkeletonizer};
use stencil_skeleton::annotate_all;
use tracing::{info, info_span};

use crate::export::{filter_messages, IngestOptions, IngestOutcome};
use crate::store::{read_messages, write_jsonl};

/// Load messages from `source`, filter them, and write the kept records to
/// `output` as JSON Lines.
pub fn run_ingest(
    source: &dyn IMessageSource,
    options: &IngestOptions,
    output: &Path,
) -> StencilResult<IngestOutcome> {
    let _span = info_span!("stencil.ingest", source = %source.describe()).entered();
    let loaded = source.load()?;
    let outcome = filter_messages(loaded, options)?;
    write_jsonl(output, &outcome.messages)?;
    info!(
        written = outcome.messages.len(),
        output = %output.display(),
        "messages written"
    );
    Ok(outcome)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub normalized: usize,
    pub skipped: usize,
    pub distinct_skeletons: usize,
}

/// Annotate every record in `input` with its canonical text and skeleton and
/// write the result to `output`.
pub fn run_normalize(
    input: &Path,
    output: &Path,
    skeletonizer: &dyn ISkeletonizer,
) -> StencilResult<(NormalizeOutcome, Vec<NormalizedMessage>)> {
    let _span = info_span!("stencil.normalize", input = %input.display()).entered();
    let loaded = read_messages(input)?;
    let skipped = loaded.skipped_count();
    if loaded.records.is_empty() {
        return Err(StencilError::empty("normalize"));
    }

    let normalized = annotate_all(loaded.records, skeletonizer);
    write_jsonl(output, &normalized)?;

    let mut skeletons: Vec<&str> = normalized.iter().map(|m| m.text_skeleton.as_str()).collect();
    skeletons.sort_unstable();
    skeletons.dedup();

    let outcome = NormalizeOutcome {
        normalized: normalized.len(),
        skipped,
        distinct_skeletons: skeletons.len(),
    };
    info!(
        normalized = outcome.normalized,
        skipped,
        distinct_skeletons = outcome.distinct_skeletons,
        output = %output.display(),
        "normalized records written"
    );
    Ok((outcome, normalized))
}
