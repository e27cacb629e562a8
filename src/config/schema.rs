//! Configuration schema definitions for Stepline.
//!
//! This module contains the struct definitions that map to the step
//! configuration document (JSON or YAML).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root structure of a step configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Workflow name (for display purposes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,

    /// What the workflow does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Workflow-wide settings
    #[serde(default)]
    pub settings: WorkflowSettings,

    /// Ordered step list; file order is execution order
    pub steps: Vec<StepConfig>,
}

/// Settings that apply to a whole workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    /// Persist each step's output to the cache directory
    #[serde(default = "default_true")]
    pub save_intermediate: bool,

    /// Retry count advertised to step implementations; the engine never retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Directory for final reports (overrides WORKFLOW_OUTPUT_DIR)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Directory for intermediate results (overrides WORKFLOW_CACHE_DIR)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Environment variables that must be set before running
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_env: Vec<String>,

    /// Environment variables some steps use when present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_env: Vec<String>,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            save_intermediate: true,
            max_retries: default_max_retries(),
            output_dir: None,
            cache_dir: None,
            required_env: Vec::new(),
            optional_env: Vec::new(),
        }
    }
}

/// One entry of the `steps` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Human-readable label, also the cache and result key
    pub name: String,

    /// Registry module the step function lives in
    pub module_name: String,

    /// Function name within the module
    pub function_name: String,

    /// What this step does
    #[serde(default)]
    pub description: String,

    /// Expected input (documentation only)
    #[serde(default)]
    pub input_type: String,

    /// Produced output (documentation only)
    #[serde(default)]
    pub output_type: String,

    /// Whether this step runs; omitted means enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_config_defaults_enabled_and_docs() {
        let yaml = r#"
name: Extract Keywords
module_name: keywords
function_name: extract
"#;
        let step: StepConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(step.enabled);
        assert_eq!(step.description, "");
        assert_eq!(step.input_type, "");
        assert_eq!(step.output_type, "");
    }

    #[test]
    fn step_config_respects_explicit_disable() {
        let json = r#"{
            "name": "Find URLs",
            "module_name": "search",
            "function_name": "top_urls",
            "enabled": false
        }"#;
        let step: StepConfig = serde_json::from_str(json).unwrap();
        assert!(!step.enabled);
    }

    #[test]
    fn step_config_requires_dispatch_fields() {
        let yaml = "name: Orphan\nmodule_name: builtin\n";
        let result: Result<StepConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn settings_default_values() {
        let settings = WorkflowSettings::default();
        assert!(settings.save_intermediate);
        assert_eq!(settings.max_retries, 3);
        assert!(settings.output_dir.is_none());
        assert!(settings.required_env.is_empty());
    }

    #[test]
    fn workflow_config_ignores_unknown_top_level_fields() {
        let json = r#"{
            "workflow_name": "Website Analysis",
            "version": "1.0",
            "settings": { "max_retries": 5, "timeout_seconds": 300 },
            "steps": []
        }"#;
        let config: WorkflowConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.workflow_name.as_deref(), Some("Website Analysis"));
        assert_eq!(config.settings.max_retries, 5);
        assert!(config.settings.save_intermediate);
        assert!(config.steps.is_empty());
    }

    #[test]
    fn workflow_config_requires_steps() {
        let result: Result<WorkflowConfig, _> = serde_yaml::from_str("workflow_name: Empty");
        assert!(result.is_err());
    }
}
