//! Registry event types.
//!
//! Emitted to subscribers for near-real-time UI updates. Only publication
//! events are guaranteed; collaborators must not rely on event scanning to
//! discover content ids — `publish_content` returns the id synchronously.

use serde::{Deserialize, Serialize};

use provena_core::{Address, ContentId};

/// Events emitted by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A source published a new content record.
    ContentPublished(ContentPublished),
}

/// Emitted when content is published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPublished {
    /// Handle of the new content record.
    pub content_id: ContentId,
    /// Fingerprint stored in the record.
    pub fingerprint: String,
    /// Address of the publishing source.
    pub publisher: Address,
}
