//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use stencil_core::config::CliOverrides;

/// Discover message templates in an SMS export.
#[derive(Debug, Parser)]
#[command(name = "stencil")]
#[command(version)]
#[command(about = "Discover message templates in an SMS export")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: ./stencil.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Cosine-distance cutoff for the similarity merge
    #[arg(long, global = true, value_name = "DISTANCE")]
    pub threshold: Option<f64>,

    /// Leave smaller clusters out of the tables
    #[arg(long, global = true, value_name = "N")]
    pub min_cluster_size: Option<usize>,

    /// Directory for tables, examples, and the report
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct IngestArgs {
    /// Export file to read instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Sender to keep; an empty string keeps every sender
    #[arg(long)]
    pub sender: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse the export into canonical message records
    Ingest(IngestArgs),
    /// Add canonical text and skeletons to the message records
    Normalize,
    /// Cluster normalized records and write tables and example files
    Cluster,
    /// Sweep candidate thresholds and recommend one
    Tune,
    /// Write the Markdown report from stored cluster tables
    Report,
    /// Write YAML template stubs from stored cluster tables
    Templates,
    /// Run every stage from ingest to templates
    Run(IngestArgs),
    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Flag values that override the configuration file and environment.
    pub fn overrides(&self) -> CliOverrides {
        let sender = match &self.command {
            Command::Ingest(args) | Command::Run(args) => args.sender.clone(),
            _ => None,
        };
        CliOverrides {
            threshold: self.global.threshold,
            min_cluster_size: self.global.min_cluster_size,
            sender,
            out_dir: self.global.out_dir.clone(),
        }
    }

    /// Export path given on the command line, if any.
    pub fn export_override(&self) -> Option<&PathBuf> {
        match &self.command {
            Command::Ingest(args) | Command::Run(args) => args.export.as_ref(),
            _ => None,
        }
    }
}
