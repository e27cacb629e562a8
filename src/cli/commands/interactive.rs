//! Interactive command implementation.
//!
//! `stepline interactive` (and `stepline` with no subcommand) asks for the
//! input, shows the steps that will run and asks before running them.

use crate::cli::args::InteractiveArgs;
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{run_with_ui, show_result, show_step_list};
use super::run::prepare_input;
use super::setup::EngineSetup;

/// The interactive command implementation.
pub struct InteractiveCommand {
    setup: EngineSetup,
    args: InteractiveArgs,
}

impl InteractiveCommand {
    pub fn new(setup: EngineSetup, args: InteractiveArgs) -> Self {
        Self { setup, args }
    }
}

impl Command for InteractiveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = self.setup.build(true, ui)?;

        ui.show_header(engine.workflow_name().unwrap_or("Stepline"));

        let raw = ui.prompt(&Prompt::input("input", "Input for the first step"))?;
        let raw = raw.as_string();
        let raw = raw.trim();
        if raw.is_empty() {
            ui.message("No input provided. Exiting.");
            return Ok(CommandResult::success());
        }

        let input = match prepare_input(raw, !self.args.no_normalize) {
            Ok(input) => input,
            Err(e) => {
                ui.error(&format!("Invalid input '{}': {}", raw, e));
                return Ok(CommandResult::failure(1));
            }
        };

        show_step_list(ui, &engine.list_steps());

        let enabled = engine.steps().iter().filter(|s| s.enabled).count();
        let shown = input.as_str().unwrap_or(raw);
        let question = format!("Run {} enabled steps on {}?", enabled, shown);
        if !ui.prompt(&Prompt::confirm("proceed", &question, false))?.as_bool() {
            ui.message("Cancelled");
            return Ok(CommandResult::success());
        }

        let save = engine.settings().save_intermediate && !self.args.no_cache;
        let result = run_with_ui(&engine, input, save, ui);
        show_result(ui, &result);

        Ok(if result.success {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn command(temp: &TempDir) -> InteractiveCommand {
        let path = temp.path().join("workflow_config.json");
        fs::write(
            &path,
            r#"{"steps": [{"name": "Normalize", "module_name": "builtin", "function_name": "normalize_url"}]}"#,
        )
        .unwrap();
        let setup = EngineSetup::for_config(path)
            .with_dirs(temp.path().join("out"), temp.path().join("cache"));
        InteractiveCommand::new(setup, InteractiveArgs::default())
    }

    #[test]
    fn prompts_then_runs() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("input", "example.com");
        ui.set_prompt_response("proceed", "y");

        let result = command(&temp).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.prompts_shown(), &["input", "proceed"]);
        assert!(ui.has_message("1. Normalize (✓ Enabled)"));
        assert!(ui.has_message("https://example.com"));
        assert!(ui.has_success("Workflow completed"));
    }

    #[test]
    fn declining_does_not_run() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("input", "example.com");
        ui.set_prompt_response("proceed", "no");

        let result = command(&temp).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Cancelled"));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn unanswered_confirmation_cancels() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("input", "example.com");

        let result = command(&temp).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Cancelled"));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn empty_input_exits_cleanly() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("input", "   ");

        let result = command(&temp).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No input provided. Exiting."));
        assert_eq!(ui.prompts_shown(), &["input"]);
        assert!(!ui.has_message("1. Normalize"));
    }
}
