//! Store Options
//!
//! The immutable record a [`ConfigStore`](super::ConfigStore) is built from.

use super::error::ReloadError;
use super::signal::ConfigChange;
use crate::Result;
use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Path used when none is supplied
pub const DEFAULT_FILE_PATH: &str = "./config.json";

/// Change signal handler: receives the previous and new published settings
pub type ChangeHandler = Arc<dyn Fn(&ConfigChange) + Send + Sync>;

/// Error signal handler
pub type ErrorHandler = Arc<dyn Fn(&ReloadError) + Send + Sync>;

/// How the initial load is performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Block construction until the first load has run
    #[default]
    Immediate,
    /// Schedule the first load on the async runtime and return right away
    Deferred,
}

/// Options resolved at construction
#[derive(Clone)]
pub struct StoreOptions {
    pub file_path: PathBuf,
    pub load_mode: LoadMode,
    pub watch: bool,
    pub on_change: Vec<ChangeHandler>,
    pub on_error: Vec<ErrorHandler>,
    pub default_settings: Option<Map<String, Value>>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            load_mode: LoadMode::Immediate,
            watch: false,
            on_change: Vec::new(),
            on_error: Vec::new(),
            default_settings: None,
        }
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("file_path", &self.file_path)
            .field("load_mode", &self.load_mode)
            .field("watch", &self.watch)
            .field("on_change", &self.on_change.len())
            .field("on_error", &self.on_error.len())
            .field("default_settings", &self.default_settings)
            .finish()
    }
}

impl StoreOptions {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub fn load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }

    pub fn watch(mut self, enabled: bool) -> Self {
        self.watch = enabled;
        self
    }

    /// Append a change handler; handlers run in the order they were added
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ConfigChange) + Send + Sync + 'static,
    {
        self.on_change.push(Arc::new(handler));
        self
    }

    /// Append an error handler; handlers run in the order they were added
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ReloadError) + Send + Sync + 'static,
    {
        self.on_error.push(Arc::new(handler));
        self
    }

    pub fn default_settings(mut self, defaults: Map<String, Value>) -> Self {
        self.default_settings = Some(defaults);
        self
    }

    /// Build options from a JSON record such as
    /// `{"filePath": "c.json", "loadImmediately": false, "watchConfigFile": true}`.
    ///
    /// Missing fields take their defaults. A field of the wrong type is a
    /// caller error and is reported here rather than at reload time.
    pub fn from_json(value: &Value) -> Result<Self> {
        let record = match value {
            Value::Null => return Ok(Self::default()),
            Value::String(path) => return Ok(Self::new(path.as_str())),
            Value::Object(_) => OptionsRecord::deserialize(value)
                .context("Malformed configuration store options")?,
            other => bail!(
                "Configuration store options must be null, a path string or an object, got: {}",
                other
            ),
        };

        let mut options = Self::default();
        if let Some(path) = record.file_path {
            options.file_path = path;
        }
        if let Some(immediate) = record.load_immediately {
            options.load_mode = if immediate {
                LoadMode::Immediate
            } else {
                LoadMode::Deferred
            };
        }
        if let Some(watch) = record.watch_config_file {
            options.watch = watch;
        }
        options.default_settings = record.default_settings;

        Ok(options)
    }

    /// Reject options no store can be built from
    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            bail!("file_path must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct OptionsRecord {
    file_path: Option<PathBuf>,
    load_immediately: Option<bool>,
    watch_config_file: Option<bool>,
    default_settings: Option<Map<String, Value>>,
}

impl From<&str> for StoreOptions {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for StoreOptions {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for StoreOptions {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl<T: Into<StoreOptions>> From<Option<T>> for StoreOptions {
    fn from(options: Option<T>) -> Self {
        options.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = StoreOptions::default();
        assert_eq!(options.file_path, PathBuf::from(DEFAULT_FILE_PATH));
        assert_eq!(options.load_mode, LoadMode::Immediate);
        assert!(!options.watch);
        assert!(options.on_change.is_empty());
        assert!(options.on_error.is_empty());
        assert!(options.default_settings.is_none());
    }

    #[test]
    fn test_absent_and_bare_path_inputs() {
        let absent: StoreOptions = None::<&str>.into();
        assert_eq!(absent.file_path, PathBuf::from(DEFAULT_FILE_PATH));

        let bare: StoreOptions = "settings.json".into();
        assert_eq!(bare.file_path, PathBuf::from("settings.json"));
        assert_eq!(bare.load_mode, LoadMode::Immediate);
    }

    #[test]
    fn test_from_json_record() {
        let options = StoreOptions::from_json(&json!({
            "filePath": "c.json",
            "loadImmediately": false,
            "watchConfigFile": true,
            "defaultSettings": {"x": 0}
        }))
        .unwrap();

        assert_eq!(options.file_path, PathBuf::from("c.json"));
        assert_eq!(options.load_mode, LoadMode::Deferred);
        assert!(options.watch);
        assert_eq!(options.default_settings.unwrap().get("x"), Some(&json!(0)));
    }

    #[test]
    fn test_from_json_partial_record_keeps_defaults() {
        let options = StoreOptions::from_json(&json!({"watchConfigFile": true})).unwrap();
        assert_eq!(options.file_path, PathBuf::from(DEFAULT_FILE_PATH));
        assert_eq!(options.load_mode, LoadMode::Immediate);
        assert!(options.watch);
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(StoreOptions::from_json(&json!({"filePath": 42})).is_err());
        assert!(StoreOptions::from_json(&json!({"loadImmediately": "yes"})).is_err());
        assert!(StoreOptions::from_json(&json!({"defaultSettings": [1, 2]})).is_err());
        assert!(StoreOptions::from_json(&json!({"filepath": "c.json"})).is_err());
        assert!(StoreOptions::from_json(&json!(7)).is_err());
    }

    #[test]
    fn test_builder_keeps_handler_order() {
        let options = StoreOptions::new("c.json")
            .on_change(|_| {})
            .on_change(|_| {})
            .on_error(|_| {});

        assert_eq!(options.on_change.len(), 2);
        assert_eq!(options.on_error.len(), 1);
    }

    #[test]
    fn test_validate_empty_path() {
        assert!(StoreOptions::new("").validate().is_err());
        assert!(StoreOptions::new("c.json").validate().is_ok());
    }
}
