//! Reload Pipeline
//!
//! The side-effect-free half of a reload: fingerprint check, parse and
//! merge. Publishing the result is the store's job.

use super::error::ReloadError;
use super::fingerprint::{ContentHasher, Fingerprint};
use super::source::SettingsParser;
use serde_json::{Map, Value};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// Settings ready to be published
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSettings {
    pub fingerprint: Fingerprint,
    pub original: Value,
    pub settings: Value,
}

/// Result of running the pure reload steps over a file's bytes
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Same bytes as last time
    Unchanged,
    Ready(PreparedSettings),
}

/// Everything the pure steps need besides the bytes
pub struct Pipeline<'a> {
    pub path: &'a Path,
    pub hasher: &'a dyn ContentHasher,
    pub parser: &'a dyn SettingsParser,
    pub defaults: Option<&'a Map<String, Value>>,
}

impl Pipeline<'_> {
    /// Fingerprint, compare against `current`, parse and merge
    pub fn prepare(
        &self,
        bytes: &[u8],
        current: Option<&Fingerprint>,
    ) -> Result<Prepared, ReloadError> {
        let fingerprint = catch_unwind(AssertUnwindSafe(|| self.hasher.fingerprint(bytes)))
            .map_err(|panic| self.internal("fingerprinting", panic))?;

        if current == Some(&fingerprint) {
            return Ok(Prepared::Unchanged);
        }

        let original = catch_unwind(AssertUnwindSafe(|| self.parser.parse(bytes)))
            .map_err(|panic| self.internal("parsing", panic))?
            .map_err(|source| ReloadError::Parse {
                path: self.path.to_path_buf(),
                source: source.into(),
            })?;

        let settings = match self.defaults {
            Some(defaults) => {
                merge_over_defaults(defaults, &original).map_err(|reason| ReloadError::Merge {
                    path: self.path.to_path_buf(),
                    reason,
                })?
            }
            None => original.clone(),
        };

        Ok(Prepared::Ready(PreparedSettings {
            fingerprint,
            original,
            settings,
        }))
    }

    fn internal(&self, stage: &str, panic: Box<dyn Any + Send>) -> ReloadError {
        let detail = panic
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        ReloadError::Internal {
            path: self.path.to_path_buf(),
            reason: format!("{} panicked: {}", stage, detail),
        }
    }
}

/// Overlay the top-level keys of `parsed` onto a copy of `defaults`.
///
/// Nested objects are replaced wholesale, not merged. `null` overlays
/// nothing, so the defaults are published as they are.
pub fn merge_over_defaults(defaults: &Map<String, Value>, parsed: &Value) -> Result<Value, String> {
    let parsed = match parsed {
        Value::Object(parsed) => parsed,
        Value::Null => return Ok(Value::Object(defaults.clone())),
        other => {
            return Err(format!(
                "settings must be a JSON object to be merged over defaults, got {}",
                json_kind(other)
            ))
        }
    };

    let mut merged = defaults.clone();
    for (key, value) in parsed {
        merged.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(merged))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
