//! Shared state accessible from HTTP handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use provena_registry::Registry;

use crate::commands::NodeCommand;

/// State shared between the HTTP API and the node's event loop.
///
/// Reads go straight to the registry; mutations go through `command_tx`.
pub struct NodeState {
    /// The authoritative in-memory registry.
    pub registry: Arc<Registry>,
    /// Sends mutations to the node's event loop.
    pub command_tx: mpsc::Sender<NodeCommand>,
    /// When the node started.
    pub start_time: Instant,
    /// Write-through persistence failures since startup.
    storage_errors: AtomicU64,
}

impl NodeState {
    /// Create shared state.
    pub fn new(registry: Arc<Registry>, command_tx: mpsc::Sender<NodeCommand>) -> Self {
        Self {
            registry,
            command_tx,
            start_time: Instant::now(),
            storage_errors: AtomicU64::new(0),
        }
    }

    /// Record a write-through persistence failure.
    pub fn record_storage_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of write-through persistence failures since startup.
    pub fn storage_error_count(&self) -> u64 {
        self.storage_errors.load(Ordering::Relaxed)
    }
}
