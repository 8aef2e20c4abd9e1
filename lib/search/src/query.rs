//! Similarity query validation.
//!
//! A similarity query is only valid when every one of the five fixed feature
//! keys carries a non-empty value that parses as a finite number. Validation
//! happens before any row is scored, so a rejected submit never touches the
//! table.

use ahash::AHashMap;
use cookielab_core::{Error, Result, FEATURE_KEYS};

/// A validated query vector over the fixed feature keys.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    values: AHashMap<String, f64>,
}

impl SimilarityQuery {
    /// Validate raw form inputs (feature key -> raw text). Keys that are
    /// absent, empty, or non-numeric are collected into
    /// [`Error::IncompleteQuery`]; extra keys are ignored.
    pub fn from_inputs(inputs: &AHashMap<String, String>) -> Result<Self> {
        let mut values = AHashMap::new();
        let mut missing = Vec::new();

        for key in FEATURE_KEYS {
            let parsed = inputs
                .get(key)
                .map(|raw| raw.trim())
                .filter(|raw| !raw.is_empty())
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|v| v.is_finite());
            match parsed {
                Some(v) => {
                    values.insert(key.to_string(), v);
                }
                None => missing.push(key.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::IncompleteQuery { missing });
        }
        Ok(Self { values })
    }

    /// The query value for a feature key. All five keys are present by
    /// construction.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Render a loosely typed JSON value into the raw-input form the validator
/// expects. Numbers pass through, strings stay as typed, anything else
/// becomes an empty input.
pub fn json_to_input(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => String::new(),
    }
}
