//! .env file parsing.
//!
//! Stepline reads an optional `.env` file from the working directory so API
//! credentials for step implementations and engine settings such as
//! `WORKFLOW_OUTPUT_DIR` can live next to the step configuration.

use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// Lines without `=` are ignored.
///
/// # Example
///
/// ```
/// use stepline::config::EnvFileParser;
///
/// let content = r#"
/// # Engine directories
/// WORKFLOW_OUTPUT_DIR=./outputs
/// export LOG_LEVEL="DEBUG"
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("WORKFLOW_OUTPUT_DIR"), Some(&"./outputs".to_string()));
/// assert_eq!(vars.get("LOG_LEVEL"), Some(&"DEBUG".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content into a map of variables.
    pub fn parse(content: &str) -> HashMap<String, String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), Self::unquote(value.trim()).to_string()))
    }

    fn unquote(value: &str) -> &str {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            &value[1..value.len() - 1]
        } else {
            value
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Load and parse an env file, returning an empty map if it doesn't exist.
    pub fn load_optional(path: &Path) -> Result<HashMap<String, String>> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(HashMap::new())
        }
    }
}
