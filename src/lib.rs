//! Stepline - a linear pipeline workflow engine.
//!
//! A workflow is an ordered list of steps loaded from configuration. Each
//! enabled step receives the previous step's output, intermediate results are
//! snapshotted to a cache directory, and every run ends with a final report.
//!
//! # Modules
//!
//! - [`cache`] - Per-step intermediate result files
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Workflow configuration and environment loading
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The workflow engine and final reports
//! - [`steps`] - Step descriptors, step data and the step registry
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use stepline::runner::{EngineOptions, WorkflowEngine};
//! use stepline::steps::{StepData, StepDescriptor, StepRegistry};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut registry = StepRegistry::with_builtins();
//! registry.register("text", "shout", |input: StepData| {
//!     Ok(json!(input.as_str().unwrap_or_default().to_uppercase()))
//! });
//!
//! let mut engine = WorkflowEngine::new(
//!     registry,
//!     EngineOptions {
//!         output_dir: dir.path().join("outputs"),
//!         cache_dir: dir.path().join("cache"),
//!     },
//! );
//! engine.register_step(StepDescriptor::new("Normalize", "builtin", "normalize_url"));
//! engine.register_step(StepDescriptor::new("Shout", "text", "shout"));
//!
//! let result = engine.execute_workflow(json!("example.com"), true);
//! assert!(result.success);
//! assert_eq!(result.data, Some(json!("HTTPS://EXAMPLE.COM")));
//! assert_eq!(result.steps_executed, vec!["Normalize", "Shout"]);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod steps;
pub mod ui;

pub use error::{Result, SteplineError};
