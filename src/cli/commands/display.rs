//! Shared display helpers for step listings and workflow results.

use crate::runner::{RunProgress, StepListing, WorkflowEngine, WorkflowResult};
use crate::steps::{to_json_lossy, StepData};
use crate::ui::{format_duration, SpinnerHandle, UserInterface};

/// Longest data preview printed after a run.
const PREVIEW_LIMIT: usize = 500;

/// Render the step list the way `stepline list` prints it.
pub fn show_step_list(ui: &mut dyn UserInterface, steps: &[StepListing]) {
    if steps.is_empty() {
        ui.message("No steps configured.");
        return;
    }

    for step in steps {
        let status = if step.enabled {
            "✓ Enabled"
        } else {
            "✗ Disabled"
        };
        ui.message(&format!("{}. {} ({})", step.index, step.name, status));
        if !step.description.is_empty() {
            ui.message(&format!("   {}", step.description));
        }
        ui.message(&format!(
            "   Input: {} → Output: {}",
            type_or_any(&step.input_type),
            type_or_any(&step.output_type)
        ));
    }
}

fn type_or_any(t: &str) -> &str {
    if t.is_empty() {
        "any"
    } else {
        t
    }
}

/// JSON preview of step data, cut to a readable length.
pub fn data_preview(data: &StepData) -> String {
    let json = to_json_lossy(data);
    if json.chars().count() <= PREVIEW_LIMIT {
        return json;
    }
    let cut: String = json.chars().take(PREVIEW_LIMIT).collect();
    format!("{}...", cut)
}

/// Run the workflow with a spinner per step.
pub fn run_with_ui(
    engine: &WorkflowEngine,
    input: StepData,
    save_intermediate: bool,
    ui: &mut dyn UserInterface,
) -> WorkflowResult {
    let mut spinner: Option<Box<dyn SpinnerHandle>> = None;

    engine.execute_workflow_with_progress(input, save_intermediate, |event| match event {
        RunProgress::StepStarting { name, index, total } => {
            spinner = Some(ui.start_spinner(&format!("[{}/{}] {}", index + 1, total, name)));
        }
        RunProgress::StepFinished { name, success } => {
            if let Some(mut s) = spinner.take() {
                if success {
                    s.finish_success(name);
                } else {
                    s.finish_error(name);
                }
            }
        }
        RunProgress::StepSkipped { name } => {
            ui.start_spinner(name)
                .finish_skipped(&format!("{} (disabled)", name));
        }
    })
}

/// Print the outcome of a run.
pub fn show_result(ui: &mut dyn UserInterface, result: &WorkflowResult) {
    if result.success {
        ui.success(&format!(
            "Workflow completed in {}",
            format_duration(result.duration())
        ));
    } else {
        ui.error(&format!(
            "Workflow failed after {}: {}",
            format_duration(result.duration()),
            result.error_message.as_deref().unwrap_or("unknown error")
        ));
    }

    if !result.steps_executed.is_empty() {
        ui.message(&format!(
            "Steps executed: {}",
            result.steps_executed.join(" → ")
        ));
    }

    if ui.output_mode().shows_step_output() {
        for name in &result.steps_executed {
            if let Some(data) = result.step_results.get(name) {
                ui.message(&format!("{}:\n{}", name, data_preview(data)));
            }
        }
    }

    if let Some(data) = &result.data {
        ui.message(&format!("Result:\n{}", data_preview(data)));
    }

    if let Some(path) = &result.report_path {
        ui.message(&format!("Report saved to {}", path.display()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use serde_json::json;
    use std::collections::HashMap;

    fn listing(index: usize, enabled: bool) -> StepListing {
        StepListing {
            index,
            name: format!("Step {}", index),
            enabled,
            description: "Does things".to_string(),
            input_type: "str".to_string(),
            output_type: String::new(),
        }
    }

    #[test]
    fn step_list_shows_status_and_types() {
        let mut ui = MockUI::new();
        show_step_list(&mut ui, &[listing(1, true), listing(2, false)]);

        assert!(ui.has_message("1. Step 1 (✓ Enabled)"));
        assert!(ui.has_message("2. Step 2 (✗ Disabled)"));
        assert!(ui.has_message("Input: str → Output: any"));
        assert!(ui.has_message("Does things"));
    }

    #[test]
    fn empty_step_list() {
        let mut ui = MockUI::new();
        show_step_list(&mut ui, &[]);
        assert!(ui.has_message("No steps configured"));
    }

    #[test]
    fn preview_is_truncated() {
        let long = json!("x".repeat(2000));
        let preview = data_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_LIMIT + 3);

        assert_eq!(data_preview(&json!(42)), "42");
    }

    #[test]
    fn failed_result_is_shown_as_error() {
        let mut ui = MockUI::new();
        let result = WorkflowResult {
            success: false,
            data: None,
            steps_executed: vec!["A".to_string()],
            execution_time: 0.5,
            error_message: Some("Step 'B' failed: boom".to_string()),
            step_results: HashMap::from([("A".to_string(), json!(42))]),
            report_path: None,
        };

        show_result(&mut ui, &result);

        assert!(ui.has_error("Step 'B' failed: boom"));
        assert!(ui.has_message("Steps executed: A"));
        assert!(!ui.has_message("Result:"));
    }
}
