//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including per-step data previews.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show spinners and final status only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Pick a mode from the global `--quiet`/`--verbose` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows step output previews.
    pub fn shows_step_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_str() {
        assert_eq!("verbose".parse::<OutputMode>(), Ok(OutputMode::Verbose));
        assert_eq!("QUIET".parse::<OutputMode>(), Ok(OutputMode::Quiet));
        assert!("loud".parse::<OutputMode>().is_err());
    }

    #[test]
    fn output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
    }

    #[test]
    fn output_mode_visibility() {
        assert!(OutputMode::Verbose.shows_step_output());
        assert!(!OutputMode::Normal.shows_step_output());
        assert!(OutputMode::Quiet.shows_spinners());
        assert!(!OutputMode::Silent.shows_spinners());
        assert!(OutputMode::Quiet.shows_status());
        assert!(!OutputMode::Silent.shows_status());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
