//! Persistent run log.
//!
//! Log events from workflow runs are appended to `<output_dir>/workflow.log`
//! next to the final reports. The binary attaches the file to its tracing
//! subscriber; the engine itself only emits events.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Result;

/// Run log file name inside the output directory.
pub const RUN_LOG_FILE: &str = "workflow.log";

/// Size past which the log is rotated when next opened.
pub const RUN_LOG_MAX_BYTES: u64 = 1024 * 1024;

/// Path of the run log for an output directory.
pub fn run_log_path(output_dir: &Path) -> PathBuf {
    output_dir.join(RUN_LOG_FILE)
}

/// Open the run log for appending, creating the output directory.
///
/// A log larger than `max_bytes` is first moved to `workflow.log.1`,
/// replacing any earlier rotation.
pub fn open_run_log(output_dir: &Path, max_bytes: u64) -> Result<File> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let path = run_log_path(output_dir);
    let oversized = fs::metadata(&path)
        .map(|m| m.len() > max_bytes)
        .unwrap_or(false);
    if oversized {
        let rotated = output_dir.join(format!("{}.1", RUN_LOG_FILE));
        fs::rename(&path, &rotated)
            .with_context(|| format!("Failed to rotate {}", path.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn creates_directory_and_appends() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("outputs");

        writeln!(open_run_log(&dir, RUN_LOG_MAX_BYTES).unwrap(), "first").unwrap();
        writeln!(open_run_log(&dir, RUN_LOG_MAX_BYTES).unwrap(), "second").unwrap();

        let content = fs::read_to_string(run_log_path(&dir)).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn rotates_oversized_log() {
        let temp = TempDir::new().unwrap();
        fs::write(run_log_path(temp.path()), "x".repeat(64)).unwrap();

        writeln!(open_run_log(temp.path(), 32).unwrap(), "fresh").unwrap();

        let rotated = fs::read_to_string(temp.path().join("workflow.log.1")).unwrap();
        assert_eq!(rotated.len(), 64);
        let current = fs::read_to_string(run_log_path(temp.path())).unwrap();
        assert_eq!(current, "fresh\n");
    }

    #[test]
    fn small_log_is_kept() {
        let temp = TempDir::new().unwrap();
        fs::write(run_log_path(temp.path()), "old\n").unwrap();

        writeln!(open_run_log(temp.path(), 32).unwrap(), "new").unwrap();

        assert!(!temp.path().join("workflow.log.1").exists());
        let current = fs::read_to_string(run_log_path(temp.path())).unwrap();
        assert_eq!(current, "old\nnew\n");
    }

    #[test]
    fn unusable_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "").unwrap();

        assert!(open_run_log(&blocker, RUN_LOG_MAX_BYTES).is_err());
    }
}
