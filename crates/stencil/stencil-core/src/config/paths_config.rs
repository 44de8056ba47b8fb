use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw message export read by ingest.
    pub export: Option<PathBuf>,
    /// Canonical message records written by ingest.
    pub messages: Option<PathBuf>,
    /// Normalized records written by the normalize stage.
    pub normalized: Option<PathBuf>,
    /// Directory for cluster tables, examples, and the report.
    pub out_dir: Option<PathBuf>,
    /// Directory for YAML template stubs.
    pub templates_dir: Option<PathBuf>,
}

impl PathsConfig {
    pub fn effective_export(&self) -> PathBuf {
        self.export
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_EXPORT_PATH))
    }

    pub fn effective_messages(&self) -> PathBuf {
        self.messages
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_MESSAGES_PATH))
    }

    pub fn effective_normalized(&self) -> PathBuf {
        self.normalized
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_NORMALIZED_PATH))
    }

    pub fn effective_out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUT_DIR))
    }

    pub fn effective_templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_TEMPLATES_DIR))
    }
}
