//! Change and Error Signals
//!
//! The store owns one dispatcher. Handlers run synchronously on whichever
//! thread performed the reload, in registration order; every emission is
//! also pushed onto a broadcast channel for stream subscribers.

use super::error::ReloadError;
use super::options::{ChangeHandler, ErrorHandler};
use parking_lot::RwLock;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, warn};

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Payload of a change signal
#[derive(Debug, Clone)]
pub struct ConfigChange {
    pub previous: Arc<Value>,
    pub current: Arc<Value>,
    pub file_path: PathBuf,
    pub timestamp: SystemTime,
}

/// Event delivered to stream subscribers
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Changed(ConfigChange),
    Error(Arc<ReloadError>),
}

/// Ordered change/error handler lists plus the broadcast side channel
pub struct SignalDispatcher {
    change_handlers: RwLock<Vec<ChangeHandler>>,
    error_handlers: RwLock<Vec<ErrorHandler>>,
    event_sender: broadcast::Sender<StoreEvent>,
}

impl Default for SignalDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalDispatcher {
    pub fn new() -> Self {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            change_handlers: RwLock::new(Vec::new()),
            error_handlers: RwLock::new(Vec::new()),
            event_sender,
        }
    }

    pub fn on_change(&self, handler: ChangeHandler) {
        self.change_handlers.write().push(handler);
    }

    pub fn on_error(&self, handler: ErrorHandler) {
        self.error_handlers.write().push(handler);
    }

    pub fn subscribe(&self) -> BroadcastStream<StoreEvent> {
        BroadcastStream::new(self.event_sender.subscribe())
    }

    /// Run every change handler, then notify stream subscribers
    pub fn emit_change(&self, change: ConfigChange) {
        // Snapshot so a handler may register further handlers without deadlocking
        let handlers = self.change_handlers.read().clone();
        for (index, handler) in handlers.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| handler(&change))).is_err() {
                error!("Change handler #{} panicked; continuing with the rest", index);
            }
        }

        if self.event_sender.send(StoreEvent::Changed(change)).is_err() {
            debug!("No stream subscribers for config change event");
        }
    }

    /// Run every error handler, then notify stream subscribers
    pub fn emit_error(&self, err: ReloadError) {
        let handlers = self.error_handlers.read().clone();
        for (index, handler) in handlers.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| handler(&err))).is_err() {
                warn!("Error handler #{} panicked; continuing with the rest", index);
            }
        }

        if self.event_sender.send(StoreEvent::Error(Arc::new(err))).is_err() {
            debug!("No stream subscribers for config error event");
        }
    }
}
