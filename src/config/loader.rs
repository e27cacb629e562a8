//! Step configuration loading.
//!
//! Reads the step list document from disk. Files ending in `.json` are
//! parsed as JSON; everything else is parsed as YAML.

use crate::config::schema::WorkflowConfig;
use crate::error::{Result, SteplineError};
use std::fs;
use std::path::Path;

/// Default step configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "workflow_config.json";

/// Document format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format of a config path.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Load and parse a step configuration file.
///
/// # Errors
///
/// Returns `ConfigParse` if the file cannot be read or its content is not a
/// valid step configuration document.
pub fn load_workflow_config(path: &Path) -> Result<WorkflowConfig> {
    let content = fs::read_to_string(path).map_err(|e| SteplineError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_workflow_config(&content, path)
}

/// Parse step configuration content.
///
/// # Arguments
///
/// * `content` - The document content
/// * `source_path` - Path used for format detection and error reporting
pub fn parse_workflow_config(content: &str, source_path: &Path) -> Result<WorkflowConfig> {
    let parsed = match ConfigFormat::from_path(source_path) {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };

    let config: WorkflowConfig = parsed.map_err(|message| SteplineError::ConfigParse {
        path: source_path.to_path_buf(),
        message,
    })?;

    validate(&config, source_path)?;
    Ok(config)
}

/// Reject entries that cannot be dispatched.
fn validate(config: &WorkflowConfig, source_path: &Path) -> Result<()> {
    for (index, step) in config.steps.iter().enumerate() {
        let missing = [
            ("name", &step.name),
            ("module_name", &step.module_name),
            ("function_name", &step.function_name),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = missing {
            return Err(SteplineError::ConfigParse {
                path: source_path.to_path_buf(),
                message: format!("steps[{}]: '{}' must not be empty", index, field),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON_CONFIG: &str = r#"{
  "workflow_name": "Website Analysis",
  "steps": [
    {
      "name": "Normalize URL",
      "module_name": "builtin",
      "function_name": "normalize_url",
      "description": "Add a scheme when missing",
      "input_type": "str",
      "output_type": "str"
    },
    {
      "name": "Extract Keywords",
      "module_name": "keywords",
      "function_name": "extract",
      "description": "Scrape keywords",
      "input_type": "str",
      "output_type": "List[str]",
      "enabled": false
    }
  ]
}"#;

    #[test]
    fn format_detection_uses_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("workflow.json")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("WORKFLOW.JSON")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("workflow.yml")),
            ConfigFormat::Yaml
        );
        assert_eq!(ConfigFormat::from_path(Path::new("workflow")), ConfigFormat::Yaml);
    }

    #[test]
    fn load_json_config_preserves_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workflow_config.json");
        fs::write(&path, JSON_CONFIG).unwrap();

        let config = load_workflow_config(&path).unwrap();
        let names: Vec<_> = config.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Normalize URL", "Extract Keywords"]);
        assert!(config.steps[0].enabled);
        assert!(!config.steps[1].enabled);
    }

    #[test]
    fn load_yaml_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workflow.yml");
        fs::write(
            &path,
            r#"
workflow_name: Keywords
settings:
  save_intermediate: false
steps:
  - name: Clean
    module_name: builtin
    function_name: clean_keywords
"#,
        )
        .unwrap();

        let config = load_workflow_config(&path).unwrap();
        assert_eq!(config.steps.len(), 1);
        assert!(!config.settings.save_intermediate);
    }

    #[test]
    fn missing_file_is_parse_error() {
        let result = load_workflow_config(Path::new("/nonexistent/workflow_config.json"));
        assert!(matches!(result, Err(SteplineError::ConfigParse { .. })));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let result = parse_workflow_config("{ \"steps\": [", Path::new("broken.json"));
        assert!(matches!(result, Err(SteplineError::ConfigParse { .. })));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let result = parse_workflow_config("steps: [name: : :", Path::new("broken.yml"));
        assert!(matches!(result, Err(SteplineError::ConfigParse { .. })));
    }

    #[test]
    fn steps_must_be_a_list() {
        let result = parse_workflow_config("{\"steps\": {\"a\": 1}}", Path::new("c.json"));
        assert!(matches!(result, Err(SteplineError::ConfigParse { .. })));
    }

    #[test]
    fn empty_function_name_is_rejected() {
        let content = r#"{"steps": [{"name": "A", "module_name": "builtin", "function_name": " "}]}"#;
        let err = parse_workflow_config(content, Path::new("c.json")).unwrap_err();
        assert!(err.to_string().contains("function_name"));
    }
}
