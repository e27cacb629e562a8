//! Engine construction shared by the commands.
//!
//! Directories resolve with this precedence: command-line flag, then the
//! configuration file's `settings`, then `WORKFLOW_OUTPUT_DIR` /
//! `WORKFLOW_CACHE_DIR`, then `./outputs` / `./cache`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::Cli;
use crate::config::{load_workflow_config, EngineEnvironment};
use crate::error::Result;
use crate::runner::{EngineOptions, WorkflowEngine};
use crate::steps::StepRegistry;
use crate::ui::UserInterface;

/// Where the engine's inputs come from.
#[derive(Debug, Clone)]
pub struct EngineSetup {
    pub config_path: PathBuf,
    pub env_file: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub skip_env_check: bool,
}

impl EngineSetup {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            env_file: cli.env_file.clone(),
            output_dir: cli.output_dir.clone(),
            cache_dir: cli.cache_dir.clone(),
            skip_env_check: cli.skip_env_check,
        }
    }

    /// Setup for a configuration file with default directories.
    pub fn for_config(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let env_file = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".env");
        Self {
            config_path,
            env_file,
            output_dir: None,
            cache_dir: None,
            skip_env_check: false,
        }
    }

    pub fn with_dirs(mut self, output_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self.cache_dir = Some(cache_dir.into());
        self
    }

    pub fn environment(&self) -> Result<EngineEnvironment> {
        EngineEnvironment::load(&self.env_file)
    }

    /// Resolve directories without requiring a valid configuration file.
    ///
    /// Used by commands that only read what earlier runs left behind.
    pub fn resolve_dirs(&self) -> Result<EngineOptions> {
        let mut options = EngineOptions::from_env(&self.environment()?);

        match load_workflow_config(&self.config_path) {
            Ok(config) => {
                if let Some(dir) = config.settings.output_dir {
                    options.output_dir = dir;
                }
                if let Some(dir) = config.settings.cache_dir {
                    options.cache_dir = dir;
                }
            }
            Err(e) => debug!("Ignoring configuration for directory lookup: {}", e),
        }

        self.apply_overrides(&mut options);
        Ok(options)
    }

    fn apply_overrides(&self, options: &mut EngineOptions) {
        if let Some(dir) = &self.output_dir {
            options.output_dir = dir.clone();
        }
        if let Some(dir) = &self.cache_dir {
            options.cache_dir = dir.clone();
        }
    }

    /// Build an engine with the built-in steps and the configured step list.
    ///
    /// When `check_env` is set and the check is not skipped, missing required
    /// variables fail the build and missing optional ones are warned about.
    pub fn build(&self, check_env: bool, ui: &mut dyn UserInterface) -> Result<WorkflowEngine> {
        let env = self.environment()?;
        let mut engine = WorkflowEngine::from_env(StepRegistry::with_builtins(), &env);
        engine.register_steps_from_config(&self.config_path)?;

        if let Some(dir) = &self.output_dir {
            engine.set_output_dir(dir.clone());
        }
        if let Some(dir) = &self.cache_dir {
            engine.set_cache_dir(dir.clone());
        }

        if check_env && !self.skip_env_check {
            let settings = engine.settings();
            let missing = env.check(&settings.required_env, &settings.optional_env)?;
            if !missing.is_empty() {
                ui.warning(&format!(
                    "Optional environment variables not set: {}",
                    missing.join(", ")
                ));
            }
        }

        Ok(engine)
    }
}
