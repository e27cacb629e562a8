//! Error types for Stepline operations.
//!
//! This module defines [`SteplineError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors propagate to the caller unchanged
//! - Step resolution and step execution errors are captured by the engine
//!   and turned into a failed [`WorkflowResult`](crate::runner::WorkflowResult)
//! - Use `anyhow::Error` (via `SteplineError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Stepline operations.
#[derive(Debug, Error)]
pub enum SteplineError {
    /// Step configuration document missing or malformed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A dispatch target could not be resolved to a registered function.
    #[error("Could not load function '{function}' from module '{module}': {cause}")]
    StepResolution {
        module: String,
        function: String,
        cause: String,
    },

    /// A step function failed while running.
    #[error("Step '{step}' failed: {message}")]
    StepExecution { step: String, message: String },

    /// A step received data of the wrong shape.
    #[error("Invalid step input: expected {expected}, found {found}")]
    InvalidInput { expected: String, found: String },

    /// Required environment variables are not set.
    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingEnvironment { names: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Stepline operations.
pub type Result<T> = std::result::Result<T, SteplineError>;
