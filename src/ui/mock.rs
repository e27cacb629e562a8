//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use stepline::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("url", "example.com");
//!
//! let answer = ui.prompt(&Prompt::input("url", "Website URL")).unwrap();
//! assert_eq!(answer.as_string(), "example.com");
//!
//! ui.success("Done!");
//! assert!(ui.has_success("Done"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::anyhow;

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// How a mock spinner ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinnerOutcome {
    Success(String),
    Error(String),
    Skipped(String),
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    outcomes: Rc<RefCell<Vec<SpinnerOutcome>>>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How each started spinner finished, in finish order.
    pub fn spinner_outcomes(&self) -> Vec<SpinnerOutcome> {
        self.outcomes.borrow().clone()
    }

    /// Prompt keys that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let value = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref())
            .cloned()
            .ok_or_else(|| anyhow!("No mock response for prompt '{}'", prompt.key))?;

        Ok(match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(PromptResult::String(value).as_bool()),
            PromptType::Input => PromptResult::String(value),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            outcomes: Rc::clone(&self.outcomes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that records how it finished.
#[derive(Debug)]
pub struct MockSpinner {
    outcomes: Rc<RefCell<Vec<SpinnerOutcome>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push(SpinnerOutcome::Success(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push(SpinnerOutcome::Error(msg.to_string()));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push(SpinnerOutcome::Skipped(msg.to_string()));
    }
}
