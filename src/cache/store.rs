//! Intermediate result storage.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::steps::{to_json_lossy, StepData};

/// Suffix appended to every cache file stem.
const RESULT_SUFFIX: &str = "_result.json";

/// Per-step snapshots of step output.
///
/// Writes are best effort: caching is a debugging aid, so [`save`](Self::save)
/// logs failures instead of returning them.
#[derive(Debug, Clone)]
pub struct ResultCache {
    /// Root directory for cache files.
    root: PathBuf,
}

/// A cache file found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct CachedResult {
    /// File name within the cache root.
    pub file_name: String,
    /// Full path.
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modification time, if the platform reports it.
    pub modified: Option<DateTime<Local>>,
}

impl ResultCache {
    /// Create a new result cache.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the cache file for a step name.
    ///
    /// Spaces and path separators become `_`, so the same name always maps to
    /// the same file inside the root.
    pub fn cache_path(&self, step_name: &str) -> PathBuf {
        let stem: String = step_name
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                c => c,
            })
            .collect();
        self.root.join(format!("{}{}", stem, RESULT_SUFFIX))
    }

    /// Persist a step's output, replacing any earlier file for the same name.
    ///
    /// Never fails: errors are logged as warnings. Returns whether the file
    /// was written.
    pub fn save(&self, step_name: &str, data: &StepData) -> bool {
        match self.write(step_name, data) {
            Ok(path) => {
                debug!("Cached result for step {} at {:?}", step_name, path);
                true
            }
            Err(e) => {
                warn!("Could not cache result for step {}: {:#}", step_name, e);
                false
            }
        }
    }

    fn write(&self, step_name: &str, data: &StepData) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))?;

        let path = self.cache_path(step_name);
        fs::write(&path, to_json_lossy(data))
            .with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }

    /// Load a cached result.
    pub fn load(&self, step_name: &str) -> Result<Option<StepData>> {
        let path = self.cache_path(step_name);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached result from {:?}", path))?;
        let data = serde_json::from_str(&json)
            .with_context(|| format!("Cached result {:?} is not valid JSON", path))?;
        Ok(Some(data))
    }

    /// List cache files, newest first.
    pub fn list(&self) -> Result<Vec<CachedResult>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.ends_with(RESULT_SUFFIX) {
                continue;
            }

            let metadata = entry.metadata()?;
            entries.push(CachedResult {
                file_name,
                path: entry.path(),
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
            });
        }

        entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        Ok(entries)
    }

    /// Remove every cache file. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.list()?;
        let count = entries.len();

        for entry in entries {
            fs::remove_file(&entry.path)
                .with_context(|| format!("Failed to remove {:?}", entry.path))?;
        }

        Ok(count)
    }

    /// Total size of cache files in bytes.
    pub fn total_size(&self) -> Result<u64> {
        Ok(self.list()?.iter().map(|e| e.size_bytes).sum())
    }
}
