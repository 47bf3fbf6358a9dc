//! Reload Errors
//!
//! Every failure a reload attempt can run into. These never escape the
//! reload pipeline as a panic or an `Err` to the caller; they are delivered
//! to the store's error handlers instead.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single reload attempt
#[derive(Debug, Error)]
pub enum ReloadError {
    /// The source file could not be opened or read
    #[error("Unable to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not valid structured data
    #[error("Unable to parse the settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Overlaying the parsed settings onto the defaults failed
    #[error("Unable to apply defaults to the settings from {}: {reason}", .path.display())]
    Merge { path: PathBuf, reason: String },

    /// A collaborator (hasher, parser, reader) panicked mid-reload
    #[error("Unexpected failure while reloading {}: {reason}", .path.display())]
    Internal { path: PathBuf, reason: String },
}

impl ReloadError {
    /// Path of the source the failed reload was reading
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Merge { path, .. }
            | Self::Internal { path, .. } => path,
        }
    }

    /// Short stage name, used in log fields
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::Merge { .. } => "merge",
            Self::Internal { .. } => "internal",
        }
    }
}
