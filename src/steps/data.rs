//! Data threaded between steps.
//!
//! The engine never looks inside step data. Every step consumes and produces a
//! [`StepData`] (a JSON value) and converts to its own typed structures at the
//! boundary with [`decode_input`] and [`encode_output`].

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SteplineError};

/// Self-describing value passed from one step to the next.
pub type StepData = serde_json::Value;

/// Short name of a value's JSON kind, for error messages.
pub fn kind_of(data: &StepData) -> &'static str {
    match data {
        StepData::Null => "null",
        StepData::Bool(_) => "boolean",
        StepData::Number(_) => "number",
        StepData::String(_) => "string",
        StepData::Array(_) => "array",
        StepData::Object(_) => "object",
    }
}

/// Convert step input into a typed value.
///
/// `expected` names the shape in the error returned on mismatch.
pub fn decode_input<T: DeserializeOwned>(data: StepData, expected: &str) -> Result<T> {
    let found = kind_of(&data);
    serde_json::from_value(data).map_err(|e| SteplineError::InvalidInput {
        expected: expected.to_string(),
        found: format!("{} ({})", found, e),
    })
}

/// Convert a typed step output into [`StepData`].
pub fn encode_output<T: Serialize>(value: &T) -> Result<StepData> {
    serde_json::to_value(value)
        .map_err(|e| anyhow::Error::new(e).context("encoding step output").into())
}

/// Render a value as pretty JSON.
///
/// Values JSON cannot represent (maps with non-string keys, failing
/// `Serialize` impls) are written as a JSON string of their `Debug` form.
pub fn to_json_lossy<T: Serialize + Debug + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::debug!("Falling back to debug representation: {}", e);
            serde_json::Value::String(format!("{:?}", value)).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Ranking {
        keyword: String,
        urls: Vec<String>,
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(true)), "boolean");
        assert_eq!(kind_of(&json!(1.5)), "number");
        assert_eq!(kind_of(&json!("x")), "string");
        assert_eq!(kind_of(&json!([1])), "array");
        assert_eq!(kind_of(&json!({"a": 1})), "object");
    }

    #[test]
    fn decode_typed_input() {
        let data = json!({"keyword": "cloud storage", "urls": ["https://a.example"]});
        let ranking: Ranking = decode_input(data, "ranking").unwrap();
        assert_eq!(ranking.keyword, "cloud storage");
        assert_eq!(ranking.urls.len(), 1);
    }

    #[test]
    fn decode_mismatch_names_both_shapes() {
        let err = decode_input::<Vec<String>>(json!("just text"), "list of strings").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("list of strings"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn encode_typed_output() {
        let ranking = Ranking {
            keyword: "seo".to_string(),
            urls: vec![],
        };
        let data = encode_output(&ranking).unwrap();
        assert_eq!(data, json!({"keyword": "seo", "urls": []}));
    }

    #[test]
    fn lossy_json_for_plain_values() {
        let rendered = to_json_lossy(&json!({"a": [1, 2]}));
        let parsed: StepData = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"a": [1, 2]}));
    }

    #[test]
    fn lossy_json_falls_back_to_debug_string() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");

        let rendered = to_json_lossy(&map);
        let parsed: StepData = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!("{(1, 2): \"pair\"}"));
    }
}
