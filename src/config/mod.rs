//! Configuration loading and environment handling for Stepline.
//!
//! - Schema definitions in [`schema`]
//! - Step list loading in [`loader`]
//! - `.env` parsing in [`env_file`]
//! - Engine environment variables in [`environment`]
//!
//! # Example
//!
//! ```
//! use stepline::config::parse_workflow_config;
//! use std::path::Path;
//!
//! let yaml = r#"
//! steps:
//!   - name: Normalize URL
//!     module_name: builtin
//!     function_name: normalize_url
//! "#;
//!
//! let config = parse_workflow_config(yaml, Path::new("workflow.yml")).unwrap();
//! assert_eq!(config.steps[0].name, "Normalize URL");
//! assert!(config.steps[0].enabled);
//! ```

pub mod env_file;
pub mod environment;
pub mod loader;
pub mod schema;

pub use env_file::EnvFileParser;
pub use environment::{EngineEnvironment, CACHE_DIR_VAR, LOG_LEVEL_VAR, OUTPUT_DIR_VAR};
pub use loader::{load_workflow_config, parse_workflow_config, ConfigFormat, DEFAULT_CONFIG_FILE};
pub use schema::{StepConfig, WorkflowConfig, WorkflowSettings};
