//! Workflow engine.
//!
//! Runs registered steps strictly in registration order, threading each
//! step's output into the next one. The first failing step ends the run.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::cache::ResultCache;
use crate::config::{load_workflow_config, EngineEnvironment, WorkflowSettings};
use crate::error::{Result, SteplineError};
use crate::steps::{StepData, StepDescriptor, StepRegistry};

use super::report::{FinalReport, ReportWriter};

/// Directories an engine writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Where final reports go.
    pub output_dir: PathBuf,
    /// Where intermediate step results go.
    pub cache_dir: PathBuf,
}

impl EngineOptions {
    pub fn from_env(env: &EngineEnvironment) -> Self {
        Self {
            output_dir: env.output_dir(),
            cache_dir: env.cache_dir(),
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_env(&EngineEnvironment::default())
    }
}

/// Progress events emitted during workflow execution.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// An enabled step is about to run. `index` counts enabled steps from 0.
    StepStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A step finished.
    StepFinished { name: &'a str, success: bool },
    /// A disabled step was passed over.
    StepSkipped { name: &'a str },
}

/// Result of running a workflow.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    /// Whether every enabled step succeeded.
    pub success: bool,
    /// Output of the last step, or the input when no step was enabled.
    /// `None` on failure.
    pub data: Option<StepData>,
    /// Names of the steps that completed, in execution order.
    pub steps_executed: Vec<String>,
    /// Wall-clock seconds.
    pub execution_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Output of every completed step, keyed by step name.
    pub step_results: HashMap<String, StepData>,
    /// Where the final report was written, if it could be.
    pub report_path: Option<PathBuf>,
}

impl WorkflowResult {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.execution_time.max(0.0))
    }
}

/// One row of [`WorkflowEngine::list_steps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepListing {
    /// 1-based position in registration order.
    pub index: usize,
    pub name: String,
    pub enabled: bool,
    pub description: String,
    pub input_type: String,
    pub output_type: String,
}

/// Steps that completed so far in a run.
#[derive(Default)]
struct RunState {
    steps_executed: Vec<String>,
    step_results: HashMap<String, StepData>,
}

/// Orchestrates the execution of a workflow.
#[derive(Debug)]
pub struct WorkflowEngine {
    registry: Arc<StepRegistry>,
    steps: Vec<StepDescriptor>,
    settings: WorkflowSettings,
    workflow_name: Option<String>,
    cache: ResultCache,
    reports: ReportWriter,
}

impl WorkflowEngine {
    /// Create an engine with no steps.
    pub fn new(registry: impl Into<Arc<StepRegistry>>, options: EngineOptions) -> Self {
        Self {
            registry: registry.into(),
            steps: Vec::new(),
            settings: WorkflowSettings::default(),
            workflow_name: None,
            cache: ResultCache::new(options.cache_dir),
            reports: ReportWriter::new(options.output_dir),
        }
    }

    /// Create an engine whose directories come from the environment.
    pub fn from_env(registry: impl Into<Arc<StepRegistry>>, env: &EngineEnvironment) -> Self {
        Self::new(registry, EngineOptions::from_env(env))
    }

    /// Append a step.
    ///
    /// Names are not required to be unique. A repeated name shares its cache
    /// file and `step_results` entry with the earlier step, and the later
    /// step's output wins.
    pub fn register_step(&mut self, descriptor: StepDescriptor) {
        if self.steps.iter().any(|s| s.name == descriptor.name) {
            warn!(
                "Step name '{}' is already registered; its cached result and step result will be overwritten",
                descriptor.name
            );
        }
        info!(
            "Registered step: {} ({})",
            descriptor.name, descriptor.target
        );
        self.steps.push(descriptor);
    }

    /// Register every step listed in a configuration file, in file order.
    ///
    /// The whole file is parsed before anything is registered, so a bad file
    /// registers nothing. Workflow settings from the file replace the current
    /// ones, and directories named there replace the engine's directories.
    pub fn register_steps_from_config(&mut self, path: &Path) -> Result<usize> {
        let config = load_workflow_config(path)?;
        let descriptors: Vec<StepDescriptor> =
            config.steps.iter().map(StepDescriptor::from_config).collect();
        let count = descriptors.len();

        if let Some(dir) = &config.settings.output_dir {
            self.set_output_dir(dir.clone());
        }
        if let Some(dir) = &config.settings.cache_dir {
            self.set_cache_dir(dir.clone());
        }
        self.settings = config.settings;
        self.workflow_name = config.workflow_name;

        for descriptor in descriptors {
            self.register_step(descriptor);
        }

        info!("Loaded {} steps from {}", count, path.display());
        Ok(count)
    }

    /// Registered steps, in execution order.
    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    pub fn workflow_name(&self) -> Option<&str> {
        self.workflow_name.as_deref()
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn output_dir(&self) -> &Path {
        self.reports.output_dir()
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.reports = ReportWriter::new(dir);
    }

    pub fn set_cache_dir(&mut self, dir: impl Into<PathBuf>) {
        self.cache = ResultCache::new(dir);
    }

    /// Run the workflow.
    pub fn execute_workflow(&self, initial_input: StepData, save_intermediate: bool) -> WorkflowResult {
        self.execute_workflow_with_progress(initial_input, save_intermediate, |_| {})
    }

    /// Run the workflow with a progress callback.
    ///
    /// Never panics and never returns an error: every failure, including a
    /// panicking step, is reported through [`WorkflowResult::error_message`].
    /// A final report is written for successful and failed runs alike.
    pub fn execute_workflow_with_progress(
        &self,
        initial_input: StepData,
        save_intermediate: bool,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> WorkflowResult {
        let started_at = Local::now();
        let start = Instant::now();
        let mut progress = RunState::default();

        info!(
            "Starting workflow {} with {} steps",
            self.workflow_name.as_deref().unwrap_or("(unnamed)"),
            self.steps.len()
        );
        debug!(
            "max_retries = {}; steps run once per workflow",
            self.settings.max_retries
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_steps(initial_input, save_intermediate, &mut progress, &mut on_progress)
        }))
        .unwrap_or_else(|payload| Err(anyhow!(panic_message(payload.as_ref())).into()));

        let execution_time = start.elapsed().as_secs_f64();
        let mut result = match outcome {
            Ok(data) => {
                info!("Workflow completed successfully in {:.2}s", execution_time);
                WorkflowResult {
                    success: true,
                    data: Some(data),
                    steps_executed: progress.steps_executed,
                    execution_time,
                    error_message: None,
                    step_results: progress.step_results,
                    report_path: None,
                }
            }
            Err(e) => {
                let message = if matches!(e, SteplineError::StepExecution { .. }) {
                    e.to_string()
                } else {
                    format!("Unexpected workflow error: {}", e)
                };
                error!("{}", message);
                WorkflowResult {
                    success: false,
                    data: None,
                    steps_executed: progress.steps_executed,
                    execution_time,
                    error_message: Some(message),
                    step_results: progress.step_results,
                    report_path: None,
                }
            }
        };

        result.report_path = self.save_report(&result, started_at);
        result
    }

    fn run_steps(
        &self,
        initial_input: StepData,
        save_intermediate: bool,
        progress: &mut RunState,
        on_progress: &mut impl FnMut(RunProgress<'_>),
    ) -> Result<StepData> {
        let total = self.steps.iter().filter(|s| s.enabled).count();
        let mut data = initial_input;
        let mut index = 0;

        for descriptor in &self.steps {
            let name = descriptor.name.as_str();
            if !descriptor.enabled {
                info!("Skipping disabled step: {}", name);
                on_progress(RunProgress::StepSkipped { name });
                continue;
            }

            info!("Executing step {}/{}: {}", index + 1, total, name);
            on_progress(RunProgress::StepStarting { name, index, total });
            index += 1;

            let output = match self.invoke(descriptor, data) {
                Ok(output) => output,
                Err(e) => {
                    on_progress(RunProgress::StepFinished {
                        name,
                        success: false,
                    });
                    return Err(SteplineError::StepExecution {
                        step: descriptor.name.clone(),
                        message: e.to_string(),
                    });
                }
            };

            if save_intermediate {
                self.cache.save(name, &output);
            }
            progress.steps_executed.push(descriptor.name.clone());
            progress
                .step_results
                .insert(descriptor.name.clone(), output.clone());
            data = output;

            info!("Step completed: {}", name);
            on_progress(RunProgress::StepFinished {
                name,
                success: true,
            });
        }

        Ok(data)
    }

    /// Resolve and call one step. A panic inside the step becomes an error.
    fn invoke(&self, descriptor: &StepDescriptor, input: StepData) -> Result<StepData> {
        let step = self.registry.resolve(&descriptor.target)?;
        panic::catch_unwind(AssertUnwindSafe(|| step.call(input)))
            .unwrap_or_else(|payload| {
                Err(anyhow!("step panicked: {}", panic_message(payload.as_ref())).into())
            })
    }

    fn save_report(&self, result: &WorkflowResult, started_at: DateTime<Local>) -> Option<PathBuf> {
        let report = FinalReport {
            success: result.success,
            final_data: result.data.clone(),
            steps_executed: result.steps_executed.clone(),
            execution_time: result.execution_time,
            timestamp: started_at.to_rfc3339(),
            error_message: result.error_message.clone(),
        };

        match self.reports.write(&report) {
            Ok(path) => {
                info!("Results saved to: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Could not save workflow report: {}", e);
                None
            }
        }
    }

    /// Describe every registered step, enabled or not.
    pub fn list_steps(&self) -> Vec<StepListing> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let listing = StepListing {
                    index: i + 1,
                    name: step.name.clone(),
                    enabled: step.enabled,
                    description: step.description.clone(),
                    input_type: step.input_type.clone(),
                    output_type: step.output_type.clone(),
                };
                debug!(
                    "{}. {} [{}] {} -> {}",
                    listing.index,
                    listing.name,
                    if listing.enabled { "enabled" } else { "disabled" },
                    listing.input_type,
                    listing.output_type
                );
                listing
            })
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
