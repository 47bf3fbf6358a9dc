//! Configuration Store
//!
//! Owns the published settings, runs reloads and publishes change/error
//! signals.

use super::error::ReloadError;
use super::fingerprint::{ContentHasher, Fingerprint, Sha1Hasher};
use super::options::{LoadMode, StoreOptions};
use super::pipeline::{Pipeline, Prepared, PreparedSettings};
use super::signal::{ConfigChange, SignalDispatcher, StoreEvent};
use super::source::{FileReader, FsReader, JsonParser, SettingsParser};
use super::watcher::{FileWatcher, NotifyWatcher, WatchEventKind, WatchHandle};
use crate::Result;
use anyhow::{bail, Context};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::SystemTime;
use tokio::runtime::Handle;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, info, warn};

/// What a single reload attempt ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStatus {
    /// New settings were published and a change signal fired
    Changed,
    /// The bytes matched the last published fingerprint; nothing happened
    Unchanged,
    /// An error signal fired; published state is untouched
    Failed,
}

/// External collaborators a store is built on
#[derive(Clone)]
pub struct Collaborators {
    pub reader: Arc<dyn FileReader>,
    pub watcher: Arc<dyn FileWatcher>,
    pub hasher: Arc<dyn ContentHasher>,
    pub parser: Arc<dyn SettingsParser>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            reader: Arc::new(FsReader),
            watcher: Arc::new(NotifyWatcher),
            hasher: Arc::new(Sha1Hasher),
            parser: Arc::new(JsonParser),
        }
    }
}

/// Published state. Replaced as a whole, never field by field.
#[derive(Debug, Clone)]
struct Snapshot {
    settings: Arc<Value>,
    original: Arc<Value>,
    fingerprint: Option<Fingerprint>,
}

impl Default for Snapshot {
    fn default() -> Self {
        let empty = Arc::new(Value::Object(Map::new()));
        Self {
            settings: Arc::clone(&empty),
            original: empty,
            fingerprint: None,
        }
    }
}

struct StoreInner {
    file_path: PathBuf,
    load_mode: LoadMode,
    default_settings: Option<Map<String, Value>>,
    state: RwLock<Snapshot>,
    /// Serializes "replace snapshot + emit change"; reentrant so a change
    /// handler may trigger a reload of its own
    publish_lock: ReentrantMutex<()>,
    initialized: AtomicBool,
    signals: SignalDispatcher,
    reader: Arc<dyn FileReader>,
    hasher: Arc<dyn ContentHasher>,
    parser: Arc<dyn SettingsParser>,
    runtime: Option<Handle>,
    watch_handle: Mutex<Option<WatchHandle>>,
}

/// Live-reloading settings store.
///
/// Cloning is cheap and every clone shares the same state and handlers.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("file_path", &self.inner.file_path)
            .field("load_mode", &self.inner.load_mode)
            .field("initialized", &self.is_initialized())
            .field("watching", &self.is_watching())
            .finish()
    }
}

impl ConfigStore {
    /// Create a store reading from the filesystem, JSON-parsed and SHA-1
    /// fingerprinted.
    ///
    /// Accepts `StoreOptions`, a bare path, or `None` for all defaults.
    pub fn new(options: impl Into<StoreOptions>) -> Result<Self> {
        Self::with_collaborators(options, Collaborators::default())
    }

    /// Create a store on custom collaborators.
    ///
    /// Fails only for caller errors: unusable options, an async load or
    /// watch requested outside a tokio runtime, or a watch that cannot be
    /// registered. Load failures are reported through the error signal.
    pub fn with_collaborators(
        options: impl Into<StoreOptions>,
        collaborators: Collaborators,
    ) -> Result<Self> {
        let options: StoreOptions = options.into();
        options.validate().context("Invalid configuration store options")?;

        let runtime = Handle::try_current().ok();
        if runtime.is_none() && (options.load_mode == LoadMode::Deferred || options.watch) {
            bail!(
                "Deferred loading and file watching require a running tokio runtime ({})",
                options.file_path.display()
            );
        }

        let signals = SignalDispatcher::new();
        signals.on_change(Arc::new(log_change));
        signals.on_error(Arc::new(log_error));
        for handler in options.on_change {
            signals.on_change(handler);
        }
        for handler in options.on_error {
            signals.on_error(handler);
        }

        let store = Self {
            inner: Arc::new(StoreInner {
                file_path: options.file_path,
                load_mode: options.load_mode,
                default_settings: options.default_settings,
                state: RwLock::new(Snapshot::default()),
                publish_lock: ReentrantMutex::new(()),
                initialized: AtomicBool::new(false),
                signals,
                reader: collaborators.reader,
                hasher: collaborators.hasher,
                parser: collaborators.parser,
                runtime,
                watch_handle: Mutex::new(None),
            }),
        };

        // Registered before the initial load so a rejected watch target fails
        // construction without any load having run or signalled
        if options.watch {
            store.start_watching(collaborators.watcher.as_ref())?;
        }

        match store.inner.load_mode {
            LoadMode::Immediate => {
                let status = store.reload();
                debug!(
                    "Initial load of {} finished: {:?}",
                    store.inner.file_path.display(),
                    status
                );
            }
            LoadMode::Deferred => store.spawn_reload(),
        }

        Ok(store)
    }

    /// Current published settings
    pub fn settings(&self) -> Arc<Value> {
        Arc::clone(&self.inner.state.read().settings)
    }

    /// Most recently parsed settings, before defaults were applied
    pub fn original_settings(&self) -> Arc<Value> {
        Arc::clone(&self.inner.state.read().original)
    }

    /// Top-level value of the published settings
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.state.read().settings.get(key).cloned()
    }

    /// Deserialize the published settings into a typed structure
    pub fn settings_as<T: DeserializeOwned>(&self) -> Result<T> {
        let settings = self.settings();
        serde_json::from_value(Value::clone(&settings)).with_context(|| {
            format!(
                "Settings from {} do not match the requested type",
                self.inner.file_path.display()
            )
        })
    }

    /// Whether at least one load has succeeded
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::Acquire)
    }

    /// Fingerprint of the bytes behind the published settings
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.inner.state.read().fingerprint.clone()
    }

    pub fn file_path(&self) -> &Path {
        &self.inner.file_path
    }

    pub fn load_mode(&self) -> LoadMode {
        self.inner.load_mode
    }

    pub fn default_settings(&self) -> Option<&Map<String, Value>> {
        self.inner.default_settings.as_ref()
    }

    pub fn is_watching(&self) -> bool {
        self.inner.watch_handle.lock().is_some()
    }

    /// Register a change handler after construction; it runs after every
    /// handler registered before it
    pub fn on_change<F>(&self, handler: F)
    where
        F: Fn(&ConfigChange) + Send + Sync + 'static,
    {
        self.inner.signals.on_change(Arc::new(handler));
    }

    /// Register an error handler after construction
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&ReloadError) + Send + Sync + 'static,
    {
        self.inner.signals.on_error(Arc::new(handler));
    }

    /// Stream of every change and error emitted from now on
    pub fn subscribe(&self) -> BroadcastStream<StoreEvent> {
        self.inner.signals.subscribe()
    }

    /// Read the file on the calling thread and run the reload pipeline
    pub fn reload(&self) -> ReloadStatus {
        let reader = &self.inner.reader;
        let path = &self.inner.file_path;
        match catch_unwind(AssertUnwindSafe(|| reader.read_sync(path))) {
            Ok(read) => self.process(read),
            Err(_) => self.fail(ReloadError::Internal {
                path: path.clone(),
                reason: "file reader panicked".to_string(),
            }),
        }
    }

    /// Read the file on the async runtime and run the reload pipeline
    pub async fn reload_async(&self) -> ReloadStatus {
        let reader = Arc::clone(&self.inner.reader);
        let path = self.inner.file_path.clone();

        let read = tokio::spawn(async move { reader.read_async(&path).await }).await;
        match read {
            Ok(read) => self.process(read),
            Err(join_err) => self.fail(ReloadError::Internal {
                path: self.inner.file_path.clone(),
                reason: format!("file read task failed: {}", join_err),
            }),
        }
    }

    /// Schedule an async reload without waiting for it
    fn spawn_reload(&self) {
        let Some(runtime) = self.inner.runtime.as_ref() else {
            warn!(
                "No async runtime available, skipping reload of {}",
                self.inner.file_path.display()
            );
            return;
        };

        let store = self.clone();
        runtime.spawn(async move {
            let status = store.reload_async().await;
            debug!(
                "Async reload of {} finished: {:?}",
                store.inner.file_path.display(),
                status
            );
        });
    }

    fn start_watching(&self, watcher: &dyn FileWatcher) -> Result<()> {
        // Weak so the registration does not keep the store alive by itself
        let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);
        let handle = watcher.watch(
            &self.inner.file_path,
            Box::new(move |kind| {
                if kind != WatchEventKind::Changed {
                    debug!("Ignoring watch event: {:?}", kind);
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    info!("Configuration file changed, reloading...");
                    ConfigStore { inner }.spawn_reload();
                }
            }),
        )?;

        *self.inner.watch_handle.lock() = Some(handle);
        Ok(())
    }

    /// Steps 2-6 of a reload, given the outcome of the read
    fn process(&self, read: std::io::Result<Vec<u8>>) -> ReloadStatus {
        let bytes = match read {
            Ok(bytes) => bytes,
            Err(source) => {
                return self.fail(ReloadError::Read {
                    path: self.inner.file_path.clone(),
                    source,
                })
            }
        };

        let current = self.fingerprint();
        let pipeline = Pipeline {
            path: &self.inner.file_path,
            hasher: self.inner.hasher.as_ref(),
            parser: self.inner.parser.as_ref(),
            defaults: self.inner.default_settings.as_ref(),
        };

        match pipeline.prepare(&bytes, current.as_ref()) {
            Ok(Prepared::Unchanged) => {
                debug!("File watch event triggered but the content fingerprint did not change");
                self.mark_initialized();
                ReloadStatus::Unchanged
            }
            Ok(Prepared::Ready(prepared)) => self.publish(prepared),
            Err(err) => self.fail(err),
        }
    }

    /// Replace the snapshot and emit the change as one unit
    fn publish(&self, prepared: PreparedSettings) -> ReloadStatus {
        let _publishing = self.inner.publish_lock.lock();

        let PreparedSettings {
            fingerprint,
            original,
            settings,
        } = prepared;

        let (previous, current) = {
            let mut state = self.inner.state.write();
            // An overlapping reload may have published these bytes already
            if state.fingerprint.as_ref() == Some(&fingerprint) {
                drop(state);
                self.mark_initialized();
                return ReloadStatus::Unchanged;
            }

            let current = Arc::new(settings);
            let previous = std::mem::replace(&mut state.settings, Arc::clone(&current));
            state.original = Arc::new(original);
            state.fingerprint = Some(fingerprint);
            (previous, current)
        };

        self.mark_initialized();
        info!(
            "Configuration reloaded successfully from {}",
            self.inner.file_path.display()
        );

        self.inner.signals.emit_change(ConfigChange {
            previous,
            current,
            file_path: self.inner.file_path.clone(),
            timestamp: SystemTime::now(),
        });

        ReloadStatus::Changed
    }

    fn fail(&self, err: ReloadError) -> ReloadStatus {
        self.inner.signals.emit_error(err);
        ReloadStatus::Failed
    }

    fn mark_initialized(&self) {
        if !self.inner.initialized.swap(true, Ordering::AcqRel) {
            debug!("Configuration store initialized: {}", self.inner.file_path.display());
        }
    }
}

/// Default change handler
fn log_change(change: &ConfigChange) {
    debug!(
        "New settings loaded from '{}': {}",
        change.file_path.display(),
        change.current
    );
}

/// Default error handler; keeps an unobserved error from going unnoticed
fn log_error(err: &ReloadError) {
    error!(stage = err.stage(), "Config reload failed: {}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchCallback;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    /// Reader serving whatever bytes the test last set
    #[derive(Default)]
    struct MemoryReader {
        content: Mutex<Option<Vec<u8>>>,
    }

    impl MemoryReader {
        fn with(content: &str) -> Arc<Self> {
            let reader = Arc::new(Self::default());
            reader.set(content);
            reader
        }

        fn set(&self, content: &str) {
            *self.content.lock() = Some(content.as_bytes().to_vec());
        }

        fn remove(&self) {
            *self.content.lock() = None;
        }

        fn current(&self) -> std::io::Result<Vec<u8>> {
            self.content.lock().clone().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "file is gone")
            })
        }
    }

    #[async_trait]
    impl FileReader for MemoryReader {
        fn read_sync(&self, _path: &Path) -> std::io::Result<Vec<u8>> {
            self.current()
        }

        async fn read_async(&self, _path: &Path) -> std::io::Result<Vec<u8>> {
            self.current()
        }
    }

    fn collaborators(reader: Arc<MemoryReader>) -> Collaborators {
        Collaborators {
            reader,
            ..Collaborators::default()
        }
    }

    fn counting_store(
        reader: Arc<MemoryReader>,
        options: StoreOptions,
    ) -> (ConfigStore, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let changes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let c = changes.clone();
        let e = errors.clone();
        let options = options
            .on_change(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .on_error(move |_| {
                e.fetch_add(1, Ordering::SeqCst);
            });

        let store = ConfigStore::with_collaborators(options, collaborators(reader)).unwrap();
        (store, changes, errors)
    }

    fn defaults(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_immediate_load_with_defaults() {
        let reader = MemoryReader::with(r#"{"x":1,"y":2}"#);
        let options = StoreOptions::new("c.json").default_settings(defaults(json!({"x": 0})));
        let (store, changes, errors) = counting_store(reader, options);

        assert_eq!(*store.settings(), json!({"x": 1, "y": 2}));
        assert_eq!(*store.original_settings(), json!({"x": 1, "y": 2}));
        assert!(store.is_initialized());
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_defaults_overlay_is_shallow() {
        let reader = MemoryReader::with(r#"{"b":3,"c":4}"#);
        let options = StoreOptions::new("c.json").default_settings(defaults(json!({"a": 1, "b": 2})));
        let (store, _, _) = counting_store(reader, options);

        assert_eq!(*store.settings(), json!({"a": 1, "b": 3, "c": 4}));
        assert_eq!(*store.original_settings(), json!({"b": 3, "c": 4}));
    }

    #[test]
    fn test_identical_bytes_are_a_noop() {
        let reader = MemoryReader::with(r#"{"a":1}"#);
        let (store, changes, errors) = counting_store(reader, StoreOptions::new("c.json"));
        let before = store.settings();

        assert_eq!(store.reload(), ReloadStatus::Unchanged);
        assert_eq!(store.reload(), ReloadStatus::Unchanged);

        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
        assert!(Arc::ptr_eq(&before, &store.settings()));
        assert!(store.is_initialized());
    }

    #[test]
    fn test_changed_bytes_publish_once_each() {
        let reader = MemoryReader::with(r#"{"a":1}"#);
        let (store, changes, _) = counting_store(reader.clone(), StoreOptions::new("c.json"));

        reader.set(r#"{"a":2}"#);
        assert_eq!(store.reload(), ReloadStatus::Changed);
        reader.set(r#"{"a":3}"#);
        assert_eq!(store.reload(), ReloadStatus::Changed);

        assert_eq!(changes.load(Ordering::SeqCst), 3);
        assert_eq!(store.get("a"), Some(json!(3)));
    }

    #[test]
    fn test_read_failure_leaves_state_untouched() {
        let reader = MemoryReader::with(r#"{"a":1}"#);
        let (store, changes, errors) = counting_store(reader.clone(), StoreOptions::new("c.json"));
        let fingerprint = store.fingerprint();

        reader.remove();
        assert_eq!(store.reload(), ReloadStatus::Failed);

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(*store.settings(), json!({"a": 1}));
        assert_eq!(*store.original_settings(), json!({"a": 1}));
        assert_eq!(store.fingerprint(), fingerprint);
    }

    #[test]
    fn test_parse_failure_leaves_state_untouched() {
        let reader = MemoryReader::with(r#"{"a":1}"#);
        let (store, _, errors) = counting_store(reader.clone(), StoreOptions::new("c.json"));
        let fingerprint = store.fingerprint();

        reader.set("{broken");
        assert_eq!(store.reload(), ReloadStatus::Failed);

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(*store.settings(), json!({"a": 1}));
        assert_eq!(store.fingerprint(), fingerprint);

        // Restoring the original bytes is recognised as unchanged
        reader.set(r#"{"a":1}"#);
        assert_eq!(store.reload(), ReloadStatus::Unchanged);
    }

    #[test]
    fn test_initial_failure_keeps_store_usable() {
        let reader = Arc::new(MemoryReader::default());
        let (store, changes, errors) = counting_store(reader.clone(), StoreOptions::new("c.json"));

        assert!(!store.is_initialized());
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(*store.settings(), json!({}));

        reader.set(r#"{"ok":true}"#);
        assert_eq!(store.reload(), ReloadStatus::Changed);
        assert!(store.is_initialized());
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_merge_failure_is_signalled() {
        let reader = MemoryReader::with("[1,2]");
        let options = StoreOptions::new("c.json").default_settings(defaults(json!({"a": 1})));
        let errors_seen = Arc::new(Mutex::new(Vec::new()));
        let seen = errors_seen.clone();
        let options = options.on_error(move |err| seen.lock().push(err.stage()));

        let store = ConfigStore::with_collaborators(options, collaborators(reader)).unwrap();

        assert!(!store.is_initialized());
        assert_eq!(*errors_seen.lock(), vec!["merge"]);
        assert_eq!(store.fingerprint(), None);
    }

    #[test]
    fn test_null_content_publishes_defaults() {
        let reader = MemoryReader::with("null");
        let options = StoreOptions::new("c.json").default_settings(defaults(json!({"a": 1})));
        let (store, changes, errors) = counting_store(reader.clone(), options);

        assert!(store.is_initialized());
        assert_eq!(*store.settings(), json!({"a": 1}));
        assert_eq!(*store.original_settings(), Value::Null);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 0);

        reader.set(r#"{"b":2}"#);
        assert_eq!(store.reload(), ReloadStatus::Changed);
        assert_eq!(*store.settings(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_change_payload_carries_previous_settings() {
        let reader = MemoryReader::with(r#"{"v":1}"#);
        let payloads = Arc::new(Mutex::new(Vec::new()));
        let p = payloads.clone();
        let options = StoreOptions::new("c.json").on_change(move |change| {
            p.lock()
                .push(((*change.previous).clone(), (*change.current).clone()));
        });
        let store = ConfigStore::with_collaborators(options, collaborators(reader.clone())).unwrap();

        reader.set(r#"{"v":2}"#);
        store.reload();

        assert_eq!(
            *payloads.lock(),
            vec![
                (json!({}), json!({"v": 1})),
                (json!({"v": 1}), json!({"v": 2})),
            ]
        );
    }

    #[test]
    fn test_handler_may_reload_reentrantly() {
        let reader = MemoryReader::with(r#"{"v":1}"#);
        let store = ConfigStore::with_collaborators(
            StoreOptions::new("c.json"),
            collaborators(reader.clone()),
        )
        .unwrap();

        let inner_store = store.clone();
        let inner_reader = reader.clone();
        let nested = Arc::new(Mutex::new(None));
        let nested_clone = nested.clone();
        store.on_change(move |change| {
            if change.current.get("v") == Some(&json!(2)) {
                inner_reader.set(r#"{"v":3}"#);
                let status = inner_store.reload();
                *nested_clone.lock() = Some(status);
            }
        });

        reader.set(r#"{"v":2}"#);
        assert_eq!(store.reload(), ReloadStatus::Changed);
        assert_eq!(*nested.lock(), Some(ReloadStatus::Changed));
        assert_eq!(store.get("v"), Some(json!(3)));
    }

    #[test]
    fn test_settings_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct AppSettings {
            port: u16,
            name: String,
        }

        let reader = MemoryReader::with(r#"{"port":8080,"name":"svc"}"#);
        let store =
            ConfigStore::with_collaborators(StoreOptions::new("c.json"), collaborators(reader))
                .unwrap();

        let typed: AppSettings = store.settings_as().unwrap();
        assert_eq!(
            typed,
            AppSettings {
                port: 8080,
                name: "svc".to_string()
            }
        );
        assert!(store.settings_as::<Vec<u8>>().is_err());
    }

    #[test]
    fn test_deferred_without_runtime_is_rejected() {
        let reader = MemoryReader::with("{}");
        let options = StoreOptions::new("c.json").load_mode(LoadMode::Deferred);
        assert!(ConfigStore::with_collaborators(options, collaborators(reader)).is_err());
    }

    struct RejectingWatcher;

    impl FileWatcher for RejectingWatcher {
        fn watch(&self, path: &Path, _on_event: WatchCallback) -> Result<WatchHandle> {
            bail!("Cannot watch {}", path.display())
        }
    }

    #[tokio::test]
    async fn test_rejected_watch_fails_before_any_load() {
        for mode in [LoadMode::Immediate, LoadMode::Deferred] {
            let reader = MemoryReader::with(r#"{"a":1}"#);
            let signals = Arc::new(AtomicUsize::new(0));
            let (c, e) = (signals.clone(), signals.clone());
            let options = StoreOptions::new("c.json")
                .load_mode(mode)
                .watch(true)
                .on_change(move |_| {
                    c.fetch_add(1, Ordering::SeqCst);
                })
                .on_error(move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                });
            let collaborators = Collaborators {
                reader,
                watcher: Arc::new(RejectingWatcher),
                ..Collaborators::default()
            };

            assert!(ConfigStore::with_collaborators(options, collaborators).is_err());

            // Give a stray deferred load the chance to run
            tokio::task::yield_now().await;
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            assert_eq!(signals.load(Ordering::SeqCst), 0, "{:?}", mode);
        }
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(ConfigStore::new(StoreOptions::new("")).is_err());
    }
}
