//! Built-in steps.
//!
//! Small, local text steps registered under the `builtin` module. They need
//! no network access, which makes them useful for composing pipelines around
//! externally provided steps and for exercising a configuration end to end.

use std::collections::HashSet;

use anyhow::anyhow;
use serde_json::json;

use crate::error::{Result, SteplineError};

use super::data::{decode_input, kind_of, StepData};
use super::registry::StepRegistry;

/// Module name the built-in steps are registered under.
pub const BUILTIN_MODULE: &str = "builtin";

/// Register every built-in step.
pub fn register(registry: &mut StepRegistry) {
    registry
        .register(BUILTIN_MODULE, "passthrough", passthrough)
        .register(BUILTIN_MODULE, "normalize_url", normalize_url)
        .register(BUILTIN_MODULE, "clean_keywords", clean_keywords)
        .register(BUILTIN_MODULE, "unique_keywords", unique_keywords);
}

/// Return the input unchanged.
pub fn passthrough(input: StepData) -> Result<StepData> {
    Ok(input)
}

/// Trim a URL and add `https://` when it has no http(s) scheme.
pub fn normalize_url(input: StepData) -> Result<StepData> {
    let url = match &input {
        StepData::String(s) => s.trim(),
        other => {
            return Err(SteplineError::InvalidInput {
                expected: "URL string".to_string(),
                found: kind_of(other).to_string(),
            })
        }
    };

    if url.is_empty() {
        return Err(anyhow!("URL cannot be empty").into());
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(json!(url))
    } else {
        Ok(json!(format!("https://{}", url)))
    }
}

/// Clean a keyword list.
///
/// Accepts an array of strings or one newline-separated string. Leading
/// bullets and numbering are stripped and empty entries dropped.
pub fn clean_keywords(input: StepData) -> Result<StepData> {
    let lines: Vec<String> = match input {
        StepData::String(text) => text.lines().map(str::to_string).collect(),
        other => decode_input(other, "keyword list or newline-separated text")?,
    };

    let cleaned: Vec<String> = lines
        .iter()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| {
                    matches!(c, '-' | '•' | '*' | '.' | ' ') || c.is_ascii_digit()
                })
                .trim()
                .to_string()
        })
        .filter(|keyword| !keyword.is_empty())
        .collect();

    Ok(json!(cleaned))
}

/// Remove case-insensitive duplicates, keeping the first spelling and order.
pub fn unique_keywords(input: StepData) -> Result<StepData> {
    let keywords: Vec<String> = decode_input(input, "keyword list")?;

    let mut seen = HashSet::new();
    let unique: Vec<String> = keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
        .collect();

    if unique.is_empty() {
        return Err(anyhow!("No valid keywords provided").into());
    }

    Ok(json!(unique))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_returns_input() {
        let data = json!({"keywords": ["a"]});
        assert_eq!(passthrough(data.clone()).unwrap(), data);
    }

    #[test]
    fn normalize_url_adds_scheme() {
        assert_eq!(
            normalize_url(json!("  example.com ")).unwrap(),
            json!("https://example.com")
        );
    }

    #[test]
    fn normalize_url_keeps_existing_scheme() {
        assert_eq!(
            normalize_url(json!("http://example.com/path")).unwrap(),
            json!("http://example.com/path")
        );
        assert_eq!(
            normalize_url(json!("https://example.com")).unwrap(),
            json!("https://example.com")
        );
    }

    #[test]
    fn normalize_url_rejects_empty_and_non_strings() {
        assert!(normalize_url(json!("   ")).is_err());
        let err = normalize_url(json!(["example.com"])).unwrap_err();
        assert!(matches!(err, SteplineError::InvalidInput { .. }));
    }

    #[test]
    fn clean_keywords_strips_bullets_and_numbering() {
        let text = "1. best cloud storage\n- secure cloud storage\n• cloud pricing\n\n* what is cloud storage\n";
        let cleaned = clean_keywords(json!(text)).unwrap();
        assert_eq!(
            cleaned,
            json!([
                "best cloud storage",
                "secure cloud storage",
                "cloud pricing",
                "what is cloud storage"
            ])
        );
    }

    #[test]
    fn clean_keywords_accepts_lists() {
        let cleaned = clean_keywords(json!(["  seo tools ", "", "2) keep"])).unwrap();
        assert_eq!(cleaned, json!(["seo tools", ") keep"]));
    }

    #[test]
    fn clean_keywords_rejects_objects() {
        assert!(clean_keywords(json!({"a": 1})).is_err());
    }

    #[test]
    fn unique_keywords_is_case_insensitive_and_ordered() {
        let unique =
            unique_keywords(json!(["Cloud Storage", "seo", "cloud storage", "SEO", "web"]))
                .unwrap();
        assert_eq!(unique, json!(["Cloud Storage", "seo", "web"]));
    }

    #[test]
    fn unique_keywords_rejects_empty_result() {
        let err = unique_keywords(json!(["  ", ""])).unwrap_err();
        assert!(err.to_string().contains("No valid keywords"));
    }
}
