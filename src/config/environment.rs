//! Engine environment.
//!
//! Resolves the settings Stepline takes from environment variables. The
//! process environment is layered over an optional `.env` file, so an
//! exported variable always wins over the file.

use crate::config::env_file::EnvFileParser;
use crate::error::{Result, SteplineError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory for final reports.
pub const OUTPUT_DIR_VAR: &str = "WORKFLOW_OUTPUT_DIR";

/// Directory for intermediate step results.
pub const CACHE_DIR_VAR: &str = "WORKFLOW_CACHE_DIR";

/// Log level used when neither `--debug` nor `RUST_LOG` is given.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

const DEFAULT_OUTPUT_DIR: &str = "./outputs";
const DEFAULT_CACHE_DIR: &str = "./cache";

/// Environment variables visible to a run.
#[derive(Debug, Clone, Default)]
pub struct EngineEnvironment {
    vars: HashMap<String, String>,
}

impl EngineEnvironment {
    /// Build from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Load the `.env` file at `dotenv_path` (if present) and overlay the
    /// process environment on top of it.
    pub fn load(dotenv_path: &Path) -> Result<Self> {
        let mut vars = EnvFileParser::load_optional(dotenv_path)?;
        vars.extend(std::env::vars());
        Ok(Self { vars })
    }

    /// Look up a variable; empty values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Directory for final reports.
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.get(OUTPUT_DIR_VAR).unwrap_or(DEFAULT_OUTPUT_DIR))
    }

    /// Directory for intermediate step results.
    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(self.get(CACHE_DIR_VAR).unwrap_or(DEFAULT_CACHE_DIR))
    }

    /// Configured log level, as a tracing filter directive.
    ///
    /// Accepts tracing names and the Python/loguru names (`WARNING`,
    /// `CRITICAL`, `SUCCESS`) that existing `.env` files use. Unknown values
    /// are passed through lowercased so the caller can report them.
    pub fn log_level(&self) -> Option<String> {
        let level = self.get(LOG_LEVEL_VAR)?.trim().to_lowercase();
        let mapped = match level.as_str() {
            "warning" => "warn",
            "critical" | "fatal" => "error",
            "success" | "notice" => "info",
            other => other,
        };
        Some(mapped.to_string())
    }

    /// Verify the variables a workflow depends on.
    ///
    /// Fails with `MissingEnvironment` when any `required` variable is unset.
    /// Otherwise returns the `optional` variables that are unset, so the caller
    /// can warn that some steps may fail.
    pub fn check(&self, required: &[String], optional: &[String]) -> Result<Vec<String>> {
        let missing = |names: &[String]| -> Vec<String> {
            names
                .iter()
                .filter(|name| self.get(name).is_none())
                .cloned()
                .collect()
        };

        let missing_required = missing(required);
        if !missing_required.is_empty() {
            return Err(SteplineError::MissingEnvironment {
                names: missing_required,
            });
        }

        Ok(missing(optional))
    }
}
