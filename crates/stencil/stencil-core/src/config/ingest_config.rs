use serde::{Deserialize, Serialize};

use crate::constants;

/// Export ingest configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Sender to keep (case-insensitive). Default: "SAB". Empty keeps all.
    pub sender: Option<String>,
    /// Drop repeated deliveries by event id. Default: true.
    pub dedupe: Option<bool>,
}

impl IngestConfig {
    /// Returns the sender filter, or `None` when filtering is disabled.
    pub fn effective_sender(&self) -> Option<&str> {
        match self.sender.as_deref() {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(s.trim()),
            None => Some(constants::DEFAULT_SENDER),
        }
    }

    pub fn effective_dedupe(&self) -> bool {
        self.dedupe.unwrap_or(true)
    }
}
