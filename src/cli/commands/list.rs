//! List command implementation.
//!
//! `stepline list` shows every configured step, enabled or not.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::steps::to_json_lossy;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_step_list;
use super::setup::EngineSetup;

/// The list command implementation.
pub struct ListCommand {
    setup: EngineSetup,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(setup: EngineSetup, args: ListArgs) -> Self {
        Self { setup, args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = self.setup.build(false, ui)?;
        let steps = engine.list_steps();

        if self.args.json {
            println!("{}", to_json_lossy(&steps));
            return Ok(CommandResult::success());
        }

        let title = engine.workflow_name().unwrap_or("Workflow steps");
        ui.show_header(title);
        show_step_list(ui, &steps);

        Ok(CommandResult::success())
    }
}
