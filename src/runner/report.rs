//! Final run reports.
//!
//! One JSON file per workflow run, named after the time the run started:
//! `workflow_result_YYYYMMDD_HHMMSS.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::steps::{to_json_lossy, StepData};

const REPORT_PREFIX: &str = "workflow_result_";
const REPORT_EXTENSION: &str = "json";

/// Summary of one workflow run as persisted to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub success: bool,
    pub final_data: Option<StepData>,
    pub steps_executed: Vec<String>,
    /// Seconds.
    pub execution_time: f64,
    /// RFC 3339 start time of the run.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FinalReport {
    /// Parse the start time back out of `timestamp`.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Local))
    }

    /// Load a report written by [`ReportWriter`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let report = serde_json::from_str(&json)
            .with_context(|| format!("Invalid report file {:?}", path))?;
        Ok(report)
    }
}

/// Writes final reports into an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Report file path for a run that started at `started_at`.
    pub fn report_path(&self, started_at: DateTime<Local>) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.{}",
            REPORT_PREFIX,
            started_at.format("%Y%m%d_%H%M%S"),
            REPORT_EXTENSION
        ))
    }

    /// Write a report, creating the output directory if needed.
    ///
    /// Two runs started within the same second share a file name; the later
    /// write wins.
    pub fn write(&self, report: &FinalReport) -> Result<PathBuf> {
        let started_at = report.started_at().unwrap_or_else(Local::now);
        let path = self.report_path(started_at);

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", self.output_dir)
        })?;
        fs::write(&path, to_json_lossy(report))
            .with_context(|| format!("Failed to write report {:?}", path))?;

        Ok(path)
    }
}

/// Most recent report in `output_dir`, by file name.
///
/// The timestamped names sort chronologically, so no metadata is consulted.
pub fn latest_report(output_dir: &Path) -> Result<Option<PathBuf>> {
    if !output_dir.is_dir() {
        return Ok(None);
    }

    let mut latest: Option<(String, PathBuf)> = None;
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_report = name.starts_with(REPORT_PREFIX)
            && Path::new(&name).extension().is_some_and(|e| e == REPORT_EXTENSION);
        if !is_report {
            continue;
        }
        let newer = match &latest {
            Some((best, _)) => name > *best,
            None => true,
        };
        if newer {
            latest = Some((name, entry.path()));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn report(success: bool, timestamp: &str) -> FinalReport {
        FinalReport {
            success,
            final_data: success.then(|| json!("x-A")),
            steps_executed: vec!["A".to_string()],
            execution_time: 0.25,
            timestamp: timestamp.to_string(),
            error_message: (!success).then(|| "Step 'B' failed: boom".to_string()),
        }
    }

    #[test]
    fn report_path_uses_start_time() {
        let writer = ReportWriter::new("/tmp/out");
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            writer.report_path(started),
            PathBuf::from("/tmp/out/workflow_result_20240309_140507.json")
        );
    }

    #[test]
    fn write_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let writer = ReportWriter::new(temp.path().join("outputs"));
        let started = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let path = writer.write(&report(true, &started.to_rfc3339())).unwrap();

        assert!(path.ends_with("workflow_result_20240102_030405.json"));
        let loaded = FinalReport::load(&path).unwrap();
        assert!(loaded.success);
        assert_eq!(loaded.final_data, Some(json!("x-A")));
        assert_eq!(loaded.steps_executed, vec!["A"]);
    }

    #[test]
    fn error_message_omitted_on_success() {
        let temp = TempDir::new().unwrap();
        let writer = ReportWriter::new(temp.path());
        let path = writer
            .write(&report(true, &Local::now().to_rfc3339()))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert!(raw.get("error_message").is_none());
        assert_eq!(raw["execution_time"], json!(0.25));
    }

    #[test]
    fn failure_report_keeps_error_message() {
        let temp = TempDir::new().unwrap();
        let writer = ReportWriter::new(temp.path());
        let path = writer
            .write(&report(false, &Local::now().to_rfc3339()))
            .unwrap();

        let loaded = FinalReport::load(&path).unwrap();
        assert!(!loaded.success);
        assert!(loaded.final_data.is_none());
        assert_eq!(
            loaded.error_message.as_deref(),
            Some("Step 'B' failed: boom")
        );
    }

    #[test]
    fn write_into_file_path_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let writer = ReportWriter::new(&blocker);
        assert!(writer.write(&report(true, &Local::now().to_rfc3339())).is_err());
    }

    #[test]
    fn latest_report_picks_newest_name() {
        let temp = TempDir::new().unwrap();
        for name in [
            "workflow_result_20240101_000000.json",
            "workflow_result_20240301_120000.json",
            "workflow_result_20240201_000000.json",
            "notes.json",
        ] {
            fs::write(temp.path().join(name), "{}").unwrap();
        }

        let latest = latest_report(temp.path()).unwrap().unwrap();
        assert!(latest.ends_with("workflow_result_20240301_120000.json"));
    }

    #[test]
    fn latest_report_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(latest_report(&temp.path().join("absent")).unwrap().is_none());
    }
}
