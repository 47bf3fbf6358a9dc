//! Configuration Module
//!
//! Live-reloading settings store: loading, change detection, watching and
//! change/error signals.

pub mod error;
pub mod fingerprint;
pub mod options;
pub mod pipeline;
pub mod signal;
pub mod source;
pub mod store;
pub mod watcher;

pub use error::ReloadError;
pub use fingerprint::{ContentHasher, Fingerprint, Sha1Hasher};
pub use options::{ChangeHandler, ErrorHandler, LoadMode, StoreOptions, DEFAULT_FILE_PATH};
pub use signal::{ConfigChange, SignalDispatcher, StoreEvent};
pub use source::{FileReader, FsReader, JsonParser, SettingsParser};
pub use store::{Collaborators, ConfigStore, ReloadStatus};
pub use watcher::{FileWatcher, ManualWatcher, NotifyWatcher, WatchCallback, WatchEventKind, WatchHandle};
