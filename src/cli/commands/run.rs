//! Run command implementation.
//!
//! `stepline run <INPUT>` executes the workflow once.

use serde_json::json;

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::steps::builtin::normalize_url;
use crate::steps::{to_json_lossy, StepData};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{run_with_ui, show_result};
use super::setup::EngineSetup;

/// The run command implementation.
pub struct RunCommand {
    setup: EngineSetup,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(setup: EngineSetup, args: RunArgs) -> Self {
        Self { setup, args }
    }
}

/// Turn raw command-line input into the first step's input.
///
/// With `normalize` the input is treated as a URL and given an `https://`
/// scheme when it has none.
pub fn prepare_input(raw: &str, normalize: bool) -> Result<StepData> {
    if normalize {
        normalize_url(json!(raw))
    } else {
        Ok(json!(raw))
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = self.setup.build(true, ui)?;

        let input = match prepare_input(&self.args.input, !self.args.no_normalize) {
            Ok(input) => input,
            Err(e) => {
                ui.error(&format!("Invalid input '{}': {}", self.args.input, e));
                return Ok(CommandResult::failure(1));
            }
        };

        let save = engine.settings().save_intermediate && !self.args.no_cache;

        let result = if self.args.json {
            let result = engine.execute_workflow(input, save);
            println!("{}", to_json_lossy(&result));
            result
        } else {
            if let Some(name) = engine.workflow_name() {
                ui.show_header(name);
            }
            let result = run_with_ui(&engine, input, save, ui);
            show_result(ui, &result);
            result
        };

        Ok(if result.success {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}
