//! Workflow execution, final reports and the run log.

pub mod engine;
pub mod report;
pub mod run_log;

pub use engine::{EngineOptions, RunProgress, StepListing, WorkflowEngine, WorkflowResult};
pub use report::{latest_report, FinalReport, ReportWriter};
pub use run_log::{open_run_log, run_log_path, RUN_LOG_MAX_BYTES};
