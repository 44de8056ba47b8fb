//! `ingest` and `normalize`.

use anyhow::Context;
use stencil_core::config::StencilConfig;
use stencil_core::models::NormalizedMessage;
use stencil_ingest::{run_ingest, run_normalize, ExportSource, IngestOptions};
use stencil_skeleton::SkeletonExtractor;

use super::analyze::skipped_line;

pub fn ingest(config: &StencilConfig) -> anyhow::Result<String> {
    let source = ExportSource::new(config.paths.effective_export());
    let output = config.paths.effective_messages();
    let options = IngestOptions::from_config(&config.ingest);

    let outcome = run_ingest(&source, &options, &output)
        .with_context(|| format!("ingest of {} failed", source.path().display()))?;

    let mut out = String::new();
    out.push_str(&format!(
        "Parsed {} messages ({} malformed blocks skipped)\n",
        outcome.parsed, outcome.malformed
    ));
    if let Some(sender) = &options.sender {
        out.push_str(&format!(
            "Sender filter '{sender}': {} other messages dropped\n",
            outcome.filtered_out
        ));
    }
    if outcome.duplicates > 0 {
        out.push_str(&format!("Duplicates dropped: {}\n", outcome.duplicates));
    }
    out.push_str(&format!(
        "Wrote {} messages to {}\n",
        outcome.messages.len(),
        output.display()
    ));
    Ok(out)
}

/// Returns the summary text and the records, so `run` can cluster them
/// without reading them back.
pub fn normalize(config: &StencilConfig) -> anyhow::Result<(String, Vec<NormalizedMessage>)> {
    let input = config.paths.effective_messages();
    let output = config.paths.effective_normalized();
    let extractor =
        SkeletonExtractor::new(&config.skeleton).context("failed to compile skeleton rules")?;

    let (outcome, normalized) = run_normalize(&input, &output, &extractor)
        .with_context(|| format!("normalize of {} failed", input.display()))?;

    let mut out = String::new();
    out.push_str(&format!(
        "Normalized {} messages ({} distinct skeletons)\n",
        outcome.normalized, outcome.distinct_skeletons
    ));
    if outcome.skipped > 0 {
        out.push_str(&skipped_line(outcome.skipped, &input.display().to_string()));
    }
    out.push_str(&format!("Wrote {}\n", output.display()));
    Ok((out, normalized))
}
