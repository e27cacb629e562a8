//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::SteplineTheme;
use super::SpinnerHandle;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// A spinner shown while a step runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: SteplineTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            theme: SteplineTheme::detect(),
        }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: SteplineTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let line = self.theme.format_skipped(msg);
        self.finish_with(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_accepts_updates() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("Running Extract Keywords");
        spinner.finish_success("Extract Keywords");
    }

    #[test]
    fn hidden_spinner_can_fail_and_skip() {
        let mut failed = ProgressSpinner::hidden();
        failed.finish_error("Scrape");

        let mut skipped = ProgressSpinner::hidden();
        skipped.finish_skipped("Optional step");
    }
}
