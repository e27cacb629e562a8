//! Last command implementation.
//!
//! `stepline last` shows the most recent final report.

use std::fs;

use crate::cli::args::LastArgs;
use crate::error::Result;
use crate::runner::{latest_report, FinalReport};
use crate::ui::theme::SteplineTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::data_preview;
use super::setup::EngineSetup;

/// The last command implementation.
pub struct LastCommand {
    setup: EngineSetup,
    args: LastArgs,
}

impl LastCommand {
    pub fn new(setup: EngineSetup, args: LastArgs) -> Self {
        Self { setup, args }
    }
}

impl Command for LastCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.setup.resolve_dirs()?;

        let Some(path) = latest_report(&options.output_dir)? else {
            ui.message(&format!(
                "No workflow reports found in {}",
                options.output_dir.display()
            ));
            return Ok(CommandResult::success());
        };

        if self.args.json {
            println!("{}", fs::read_to_string(&path)?);
            return Ok(CommandResult::success());
        }

        let report = FinalReport::load(&path)?;
        let theme = SteplineTheme::detect();

        ui.show_header("Last Run");

        let status = if report.success {
            theme.success.apply_to("Success").to_string()
        } else {
            theme.error.apply_to("Failed").to_string()
        };
        ui.message(&format!("  {}    {}", theme.key.apply_to("Status:"), status));

        let when = report
            .started_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| report.timestamp.clone());
        ui.message(&format!("  {}      {}", theme.key.apply_to("When:"), when));
        ui.message(&format!(
            "  {}  {:.2}s",
            theme.key.apply_to("Duration:"),
            report.execution_time
        ));
        ui.message(&format!(
            "  {}     {}",
            theme.key.apply_to("Steps:"),
            if report.steps_executed.is_empty() {
                "(none)".to_string()
            } else {
                report.steps_executed.join(" → ")
            }
        ));

        if let Some(error) = &report.error_message {
            ui.message(&format!("  {}     {}", theme.key.apply_to("Error:"), error));
        }
        if let Some(data) = &report.final_data {
            ui.message(&format!("\n{}", data_preview(data)));
        }
        ui.message(&format!(
            "\n  {}",
            theme.dim.apply_to(path.display().to_string())
        ));

        Ok(CommandResult::success())
    }
}
