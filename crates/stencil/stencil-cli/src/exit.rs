//! Process exit codes, one per fatal error kind.

use std::process::ExitCode;

use stencil_core::errors::error_code;
use stencil_core::errors::{ConfigError, StencilError, StencilErrorCode};

/// Exit codes reported by the `stencil` binary. Clap exits with 2 on usage
/// errors before any of these apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// Any failure without a more specific code.
    Failure = 1,
    Config = 3,
    MissingInput = 4,
    EmptyResult = 5,
    Pattern = 6,
    Io = 7,
    Serialization = 8,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl CliExitCode {
    pub fn from_error_code(code: &str) -> Self {
        match code {
            error_code::CONFIG_ERROR => Self::Config,
            error_code::MISSING_INPUT => Self::MissingInput,
            error_code::EMPTY_RESULT => Self::EmptyResult,
            error_code::PATTERN_ERROR => Self::Pattern,
            error_code::IO_ERROR => Self::Io,
            error_code::SERIALIZATION_ERROR => Self::Serialization,
            _ => Self::Failure,
        }
    }
}

/// Exit code for an error raised anywhere below the binary, looking through
/// any context added on the way up.
pub fn exit_code_for_error(err: &anyhow::Error) -> CliExitCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<StencilError>() {
            return CliExitCode::from_error_code(e.error_code());
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return CliExitCode::from_error_code(e.error_code());
        }
    }
    CliExitCode::Failure
}

/// `[CODE] message` for the first typed error in the chain.
pub fn tagged_message(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<StencilError>()
            .map(|e| e.tagged())
            .or_else(|| cause.downcast_ref::<ConfigError>().map(|e| e.tagged()))
    })
}
