//! `report` and `templates`.

use std::path::Path;

use anyhow::Context;
use stencil_core::config::StencilConfig;
use stencil_report::{write_artifacts, ArtifactSet, ReportContext, StoredRun};

use super::analyze::skipped_line;

fn load_run(config: &StencilConfig) -> anyhow::Result<StoredRun> {
    let out_dir = config.paths.effective_out_dir();
    StoredRun::load(&out_dir, &config.paths.effective_normalized())
        .with_context(|| format!("failed to load cluster tables from {}", out_dir.display()))
}

fn write(
    set: ArtifactSet,
    ctx: &ReportContext<'_>,
    config: &StencilConfig,
    root: &Path,
) -> anyhow::Result<String> {
    let written = write_artifacts(set, ctx, config, root)
        .with_context(|| format!("failed to write artifacts to {}", root.display()))?;
    Ok(match set {
        ArtifactSet::Templates => format!(
            "Wrote {} template stubs to {}\n",
            written.len(),
            root.display()
        ),
        _ => written
            .iter()
            .map(|path| format!("Wrote {}\n", path.display()))
            .collect(),
    })
}

/// The Markdown report, written under the output directory.
pub fn write_report(config: &StencilConfig, ctx: &ReportContext<'_>) -> anyhow::Result<String> {
    write(ArtifactSet::Report, ctx, config, &config.paths.effective_out_dir())
}

/// Template stubs, written under the templates directory.
pub fn write_templates(config: &StencilConfig, ctx: &ReportContext<'_>) -> anyhow::Result<String> {
    write(
        ArtifactSet::Templates,
        ctx,
        config,
        &config.paths.effective_templates_dir(),
    )
}

fn skip_note(config: &StencilConfig, run: &StoredRun) -> String {
    if run.skipped == 0 {
        return String::new();
    }
    skipped_line(
        run.skipped,
        &format!(
            "{} and the cluster tables",
            config.paths.effective_normalized().display()
        ),
    )
}

pub fn report(config: &StencilConfig) -> anyhow::Result<String> {
    let run = load_run(config)?;
    let mut out = skip_note(config, &run);
    out.push_str(&write_report(config, &run.context())?);
    Ok(out)
}

pub fn templates(config: &StencilConfig) -> anyhow::Result<String> {
    let run = load_run(config)?;
    let mut out = skip_note(config, &run);
    out.push_str(&write_templates(config, &run.context())?);
    Ok(out)
}
