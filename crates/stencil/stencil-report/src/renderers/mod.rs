//! Renderers: each turns a [`ReportContext`] into one or more files.

pub mod examples;
pub mod markdown;
pub mod tables;
pub mod templates;

use stencil_core::config::StencilConfig;
use stencil_core::errors::StencilResult;
use tracing::debug;

use crate::context::ReportContext;
use crate::writer::{OwnedFiles, RenderedFile};

/// Trait for artifact generation.
pub trait ArtifactRenderer: Send + Sync {
    fn name(&self) -> &'static str;
    fn render(&self, ctx: &ReportContext<'_>) -> StencilResult<Vec<RenderedFile>>;

    /// Per-cluster file family this renderer replaces wholesale on each run.
    fn owned_files(&self) -> Option<OwnedFiles> {
        None
    }
}

/// The artifact groups written by the CLI stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSet {
    /// Tables and example files, under the output directory.
    Cluster,
    /// The Markdown report, under the output directory.
    Report,
    /// YAML template stubs, under the templates directory.
    Templates,
}

/// Renderers for one artifact group, configured from `config`.
pub fn renderers_for(set: ArtifactSet, config: &StencilConfig) -> Vec<Box<dyn ArtifactRenderer>> {
    match set {
        ArtifactSet::Cluster => vec![
            Box::new(tables::TablesRenderer),
            Box::new(examples::ExamplesRenderer::from_config(config)),
        ],
        ArtifactSet::Report => vec![Box::new(markdown::MarkdownRenderer::from_config(config))],
        ArtifactSet::Templates => vec![Box::new(templates::TemplateRenderer::from_config(config))],
    }
}

/// Run several renderers, collecting every file before anything is written.
pub fn render_all(
    renderers: &[Box<dyn ArtifactRenderer>],
    ctx: &ReportContext<'_>,
) -> StencilResult<Vec<RenderedFile>> {
    let mut files = Vec::new();
    for renderer in renderers {
        let rendered = renderer.render(ctx)?;
        debug!(renderer = renderer.name(), files = rendered.len(), "rendered");
        files.extend(rendered);
    }
    Ok(files)
}
