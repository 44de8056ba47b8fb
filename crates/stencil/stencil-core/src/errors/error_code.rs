//! StencilErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// alongside its human-readable message.
pub trait StencilErrorCode {
    /// Returns the error code string (e.g., "MISSING_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged message: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MISSING_INPUT: &str = "MISSING_INPUT";
pub const EMPTY_RESULT: &str = "EMPTY_RESULT";
pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const PATTERN_ERROR: &str = "PATTERN_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
