//! Non-interactive UI for pipes, CI and scripts.

use std::collections::HashMap;

use anyhow::anyhow;

use crate::error::Result;

use super::{
    OutputMode, ProgressSpinner, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Environment variable prefix for answering prompts without a terminal.
///
/// `STEPLINE_PROMPT_URL=example.com` answers the prompt keyed `url`.
pub const PROMPT_ENV_PREFIX: &str = "STEPLINE_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `STEPLINE_PROMPT_*` variables, then from the
/// prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn answer(&self, prompt: &Prompt) -> Option<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .cloned()
    }
}

/// Spinner stand-in that prints one line per finished step.
struct LineSpinner;

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("○ {}", msg);
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let value = self.answer(prompt).ok_or_else(|| {
            anyhow!(
                "Cannot prompt for '{}' in non-interactive mode (set {}{})",
                prompt.key,
                PROMPT_ENV_PREFIX,
                prompt.key.to_uppercase()
            )
        })?;

        Ok(match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(PromptResult::String(value).as_bool()),
            PromptType::Input => PromptResult::String(value),
        })
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(LineSpinner)
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(key: &str, value: &str) -> NonInteractiveUI {
        let mut overrides = HashMap::new();
        overrides.insert(key.to_string(), value.to_string());
        NonInteractiveUI::with_overrides(OutputMode::Normal, overrides)
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut ui = ui_with("STEPLINE_PROMPT_URL", "example.com");
        let result = ui.prompt(&Prompt::input("url", "Website URL")).unwrap();
        assert_eq!(result, PromptResult::String("example.com".to_string()));
    }

    #[test]
    fn confirm_override_is_parsed() {
        let mut ui = ui_with("STEPLINE_PROMPT_PROCEED", "no");
        let result = ui
            .prompt(&Prompt::confirm("proceed", "Proceed?", true))
            .unwrap();
        assert_eq!(result, PromptResult::Bool(false));
    }

    #[test]
    fn prompt_falls_back_to_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let result = ui
            .prompt(&Prompt::confirm("proceed", "Proceed?", true))
            .unwrap();
        assert_eq!(result, PromptResult::Bool(true));
    }

    #[test]
    fn prompt_without_answer_fails() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let err = ui.prompt(&Prompt::input("url", "Website URL")).unwrap_err();
        assert!(err.to_string().contains("STEPLINE_PROMPT_URL"));
    }

    #[test]
    fn never_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Verbose, HashMap::new());
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
