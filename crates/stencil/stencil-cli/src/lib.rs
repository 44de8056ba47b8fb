//! # stencil-cli
//!
//! The `stencil` binary: one subcommand per pipeline stage, `run` for all
//! of them in order, and `config` to print the effective configuration.
//!
//! Stages hand data to each other through files, so any stage can be rerun
//! on its own:
//!
//! - `ingest`: export file -> `messages.jsonl`
//! - `normalize`: `messages.jsonl` -> `messages_normalized.jsonl`
//! - `cluster`: normalized records -> `clusters.csv`, `cluster_membership.csv`,
//!   `cluster_examples/`
//! - `report`, `templates`: stored tables -> `cluster_report.md`, `templates/`
//! - `tune`: normalized records -> threshold sweep on stdout

pub mod cli;
pub mod commands;
pub mod exit;
pub mod logging;

pub use cli::{Cli, Command, GlobalArgs, IngestArgs};
pub use commands::execute;
pub use exit::{exit_code_for_error, tagged_message, CliExitCode};
