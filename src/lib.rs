//! livecfg Library
//!
//! Live-reloading configuration: loads JSON settings from a file, overlays
//! them on optional defaults, and watches the file so that real content
//! changes are re-published through ordered change/error signals.

pub mod config;
pub mod shutdown;

pub use config::{ConfigStore, LoadMode, ReloadError, ReloadStatus, StoreOptions};
pub use shutdown::ShutdownCoordinator;

/// Common error type for the library
pub type Result<T> = anyhow::Result<T>;
