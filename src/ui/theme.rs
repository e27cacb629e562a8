//! Visual theme and styling.

use console::Style;

/// Stepline's visual theme.
#[derive(Debug, Clone)]
pub struct SteplineTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warning messages (orange).
    pub warning: Style,
    /// Error messages (red bold).
    pub error: Style,
    /// Secondary text.
    pub dim: Style,
    /// Important text (bold).
    pub highlight: Style,
    /// Headers (cyan bold).
    pub header: Style,
    /// Key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for SteplineTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SteplineTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
        }
    }

    /// Theme matching the current color settings.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▶"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::colors_enabled() && console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_status_icons() {
        let theme = SteplineTheme::plain();
        assert_eq!(theme.format_success("Complete"), "✓ Complete");
        assert_eq!(theme.format_warning("Caution"), "⚠ Caution");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.format_skipped("Skipped"), "○ Skipped");
    }

    #[test]
    fn theme_formats_header() {
        let theme = SteplineTheme::plain();
        let msg = theme.format_header("Website Analysis");
        assert!(msg.contains("Website Analysis"));
    }

    #[test]
    fn default_impl_matches_new() {
        let default = SteplineTheme::default();
        let new = SteplineTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
