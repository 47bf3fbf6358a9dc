//! Configuration File Watcher
//!
//! Turns filesystem notifications into the small set of event kinds the
//! store cares about.

use crate::Result;
use anyhow::Context;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What a watch notification says about the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    /// The file's content may have changed
    Changed,
    /// The file was renamed away
    Renamed,
    /// The file was removed
    Removed,
    /// Anything else (access, unknown)
    Other,
}

/// Callback invoked for every notification that concerns the watched file
pub type WatchCallback = Box<dyn Fn(WatchEventKind) + Send + Sync + 'static>;

/// Keeps a watch registration alive; dropping it ends the registration
pub struct WatchHandle {
    _guard: Box<dyn Any + Send>,
}

impl WatchHandle {
    pub fn new<G: Any + Send>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle").finish_non_exhaustive()
    }
}

/// Registers persistent watches on a single file
pub trait FileWatcher: Send + Sync {
    fn watch(&self, path: &Path, on_event: WatchCallback) -> Result<WatchHandle>;
}

/// `notify`-backed watcher.
///
/// Watches the file's parent directory rather than the file itself, since
/// editors that save by rename would otherwise silently end the watch.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyWatcher;

impl FileWatcher for NotifyWatcher {
    fn watch(&self, path: &Path, on_event: WatchCallback) -> Result<WatchHandle> {
        let target = path.to_path_buf();
        let file_name = target
            .file_name()
            .map(|name| name.to_os_string())
            .with_context(|| format!("Configuration path has no file name: {}", target.display()))?;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    debug!("File event: {:?}", event);

                    let affects_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()));
                    if !affects_config {
                        return;
                    }

                    on_event(classify(&event.kind));
                }
                Err(e) => error!("File watcher error: {}", e),
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        let parent_dir = watch_dir(&target);
        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", parent_dir.display()))?;

        info!("Started watching configuration directory: {}", parent_dir.display());
        Ok(WatchHandle::new(watcher))
    }
}

/// Directory to register with the backend; a bare file name lives in `.`
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Map a backend event kind onto the store's vocabulary
pub fn classify(kind: &EventKind) -> WatchEventKind {
    match kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => WatchEventKind::Renamed,
        // Includes renames onto the target, which is how atomic saves land
        EventKind::Create(_) | EventKind::Modify(_) => WatchEventKind::Changed,
        EventKind::Remove(_) => {
            warn!("Configuration file was removed");
            WatchEventKind::Removed
        }
        _ => WatchEventKind::Other,
    }
}

/// Watcher driven by hand.
///
/// Useful when the host learns about changes some other way (a SIGHUP, an
/// admin endpoint) and in tests.
#[derive(Clone, Default)]
pub struct ManualWatcher {
    callbacks: Arc<Mutex<Vec<(PathBuf, Arc<WatchCallback>)>>>,
}

impl ManualWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `kind` to every registration; returns how many were notified
    pub fn trigger(&self, kind: WatchEventKind) -> usize {
        let callbacks: Vec<_> = self
            .callbacks
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for cb in &callbacks {
            cb(kind);
        }
        callbacks.len()
    }

    /// Paths registered so far, in registration order
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        self.callbacks.lock().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl FileWatcher for ManualWatcher {
    fn watch(&self, path: &Path, on_event: WatchCallback) -> Result<WatchHandle> {
        self.callbacks
            .lock()
            .push((path.to_path_buf(), Arc::new(on_event)));
        Ok(WatchHandle::new(()))
    }
}
