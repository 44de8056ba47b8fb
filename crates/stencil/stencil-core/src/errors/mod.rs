//! Error handling for Stencil.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod loaded;
pub mod stencil_error;

pub use config_error::ConfigError;
pub use error_code::StencilErrorCode;
pub use loaded::Loaded;
pub use stencil_error::StencilError;

/// Result alias used across the workspace.
pub type StencilResult<T> = Result<T, StencilError>;
