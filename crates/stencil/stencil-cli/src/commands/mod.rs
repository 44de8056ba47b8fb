//! Subcommand handlers. Each returns the text printed on stdout.

pub mod analyze;
pub mod artifacts;
pub mod prepare;

use std::path::Path;

use anyhow::Context;
use stencil_core::config::StencilConfig;
use stencil_report::ReportContext;

use crate::cli::{Cli, Command};

/// Resolve the configuration for `cli` relative to `root`.
pub fn load_config(cli: &Cli, root: &Path) -> anyhow::Result<StencilConfig> {
    let mut config = StencilConfig::load(root, cli.global.config.as_deref(), Some(&cli.overrides()))
        .context("failed to load configuration")?;
    if let Some(export) = cli.export_override() {
        config.paths.export = Some(export.clone());
    }
    Ok(config)
}

/// Run the selected subcommand.
pub fn execute(cli: &Cli, root: &Path) -> anyhow::Result<String> {
    let config = load_config(cli, root)?;
    match &cli.command {
        Command::Ingest(_) => prepare::ingest(&config),
        Command::Normalize => prepare::normalize(&config).map(|(text, _)| text),
        Command::Cluster => analyze::cluster(&config),
        Command::Tune => analyze::tune(&config),
        Command::Report => artifacts::report(&config),
        Command::Templates => artifacts::templates(&config),
        Command::Run(_) => run_all(&config),
        Command::Config => config
            .to_toml()
            .context("failed to serialize configuration"),
    }
}

/// Every stage in order, clustering the freshly normalized records in
/// memory.
pub fn run_all(config: &StencilConfig) -> anyhow::Result<String> {
    let mut out = prepare::ingest(config)?;
    let (text, normalized) = prepare::normalize(config)?;
    out.push_str(&text);
    let (text, discovery) = analyze::discover(config, normalized)?;
    out.push_str(&text);
    let ctx = ReportContext::from_cluster_set(&discovery.clusters);
    out.push_str(&artifacts::write_report(config, &ctx)?);
    out.push_str(&artifacts::write_templates(config, &ctx)?);
    Ok(out)
}
