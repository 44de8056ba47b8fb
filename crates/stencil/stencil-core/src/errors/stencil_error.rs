//! Pipeline errors.

use std::path::Path;

use super::error_code::{self, StencilErrorCode};
use super::ConfigError;

/// Errors raised by the discovery pipeline and its file collaborators.
///
/// `MissingInput`, `EmptyResult`, and `Pattern` abort a run. `MalformedRecord`
/// is non-fatal: loaders collect it in [`super::Loaded`] and keep going.
#[derive(Debug, thiserror::Error)]
pub enum StencilError {
    #[error("input not found: {path}")]
    MissingInput { path: String },

    #[error("no qualifying messages after {stage}")]
    EmptyResult { stage: String },

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("skeleton rule '{rule}' failed to compile: {reason}")]
    Pattern { rule: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{format} error: {message}")]
    Serialization {
        format: &'static str,
        message: String,
    },
}

impl StencilError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn missing_input(path: impl AsRef<Path>) -> Self {
        Self::MissingInput {
            path: path.as_ref().display().to_string(),
        }
    }

    pub fn empty(stage: impl Into<String>) -> Self {
        Self::EmptyResult {
            stage: stage.into(),
        }
    }

    pub fn serialization(format: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            format,
            message: err.to_string(),
        }
    }
}

impl StencilErrorCode for StencilError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => error_code::MISSING_INPUT,
            Self::EmptyResult { .. } => error_code::EMPTY_RESULT,
            Self::MalformedRecord { .. } => error_code::MALFORMED_RECORD,
            Self::Pattern { .. } => error_code::PATTERN_ERROR,
            Self::Config(e) => e.error_code(),
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Serialization { .. } => error_code::SERIALIZATION_ERROR,
        }
    }
}
