//! Batch command implementation.
//!
//! `stepline batch <FILE>` runs the workflow once per non-empty line.

use std::fs;

use crate::cli::args::BatchArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{run_with_ui, show_result};
use super::run::prepare_input;
use super::setup::EngineSetup;

/// The batch command implementation.
pub struct BatchCommand {
    setup: EngineSetup,
    args: BatchArgs,
}

impl BatchCommand {
    pub fn new(setup: EngineSetup, args: BatchArgs) -> Self {
        Self { setup, args }
    }
}

/// Non-empty, trimmed lines of a batch file.
pub fn read_inputs(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl Command for BatchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let content = match fs::read_to_string(&self.args.file) {
            Ok(content) => content,
            Err(e) => {
                ui.error(&format!(
                    "Cannot read batch file {}: {}",
                    self.args.file.display(),
                    e
                ));
                return Ok(CommandResult::failure(1));
            }
        };

        let inputs = read_inputs(&content);
        if inputs.is_empty() {
            ui.error(&format!("No inputs found in {}", self.args.file.display()));
            return Ok(CommandResult::failure(1));
        }

        let engine = self.setup.build(true, ui)?;
        let save = engine.settings().save_intermediate && !self.args.no_cache;
        let total = inputs.len();
        let mut successful = 0;

        for (i, raw) in inputs.iter().enumerate() {
            ui.show_header(&format!("[{}/{}] {}", i + 1, total, raw));

            let input = match prepare_input(raw, !self.args.no_normalize) {
                Ok(input) => input,
                Err(e) => {
                    ui.error(&format!("Invalid input '{}': {}", raw, e));
                    continue;
                }
            };

            let result = run_with_ui(&engine, input, save, ui);
            show_result(ui, &result);
            if result.success {
                successful += 1;
            }
        }

        let summary = format!("Batch complete: {}/{} successful", successful, total);
        if successful == total {
            ui.success(&summary);
            Ok(CommandResult::success())
        } else {
            ui.warning(&summary);
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    const URL_STEPS: &str =
        r#"{"steps": [{"name": "Normalize", "module_name": "builtin", "function_name": "normalize_url"}]}"#;

    const KEYWORD_STEPS: &str = r#"{"steps": [
        {"name": "Clean", "module_name": "builtin", "function_name": "clean_keywords"},
        {"name": "Unique", "module_name": "builtin", "function_name": "unique_keywords"}
    ]}"#;

    fn command(temp: &TempDir, config: &str, lines: Option<&str>) -> BatchCommand {
        let config_path = temp.path().join("workflow_config.json");
        fs::write(&config_path, config).unwrap();

        let file = temp.path().join("inputs.txt");
        if let Some(lines) = lines {
            fs::write(&file, lines).unwrap();
        }

        let setup = EngineSetup::for_config(config_path)
            .with_dirs(temp.path().join("out"), temp.path().join("cache"));
        BatchCommand::new(
            setup,
            BatchArgs {
                file,
                no_cache: true,
                no_normalize: false,
            },
        )
    }

    #[test]
    fn read_inputs_skips_blank_lines() {
        assert_eq!(
            read_inputs("a.com\n\n  b.com  \n\t\n"),
            vec!["a.com".to_string(), "b.com".to_string()]
        );
    }

    #[test]
    fn runs_every_input() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, URL_STEPS, Some("a.example\nb.example\n"));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.headers().len(), 2);
        assert!(ui.has_success("Batch complete: 2/2 successful"));
    }

    #[test]
    fn partial_failure_exits_nonzero() {
        let temp = TempDir::new().unwrap();
        let mut cmd = command(&temp, KEYWORD_STEPS, Some("seo tools\n-\n"));
        cmd.args.no_normalize = true;
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No valid keywords"));
        assert!(ui.has_warning("Batch complete: 1/2 successful"));
    }

    #[test]
    fn missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, URL_STEPS, None);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Cannot read batch file"));
    }

    #[test]
    fn empty_file_fails() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, URL_STEPS, Some("\n\n"));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No inputs found"));
    }
}
