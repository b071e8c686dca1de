//! Commands dispatched from the HTTP API to the node's mutation loop.
//!
//! Every state-changing operation flows through this channel and is applied
//! one at a time, giving the registry the single global sequence of state
//! transitions it assumes. Reads bypass the loop entirely.

use tokio::sync::oneshot;

use provena_core::{Address, ContentId, ContentRecord, Source};
use provena_registry::RegistryError;

/// A mutation sent from the HTTP API to the node's event loop.
pub enum NodeCommand {
    /// Register a new source.
    RegisterSource {
        address: Address,
        public_key: String,
        name: String,
        reply: oneshot::Sender<Result<Source, RegistryError>>,
    },
    /// Publish a content fingerprint.
    PublishContent {
        publisher: Address,
        fingerprint: String,
        content_type: String,
        reply: oneshot::Sender<Result<ContentRecord, RegistryError>>,
    },
    /// Append a modification to a content id's history.
    RecordModification {
        content_id: ContentId,
        fingerprint: String,
        description: String,
        modifier: Address,
        reply: oneshot::Sender<Result<u64, RegistryError>>,
    },
    /// Administratively adjust a source's credibility score.
    AdjustCredibility {
        caller: Address,
        target: Address,
        delta: i64,
        reply: oneshot::Sender<Result<Source, RegistryError>>,
    },
    /// Administratively set a source's verification flag.
    SetSourceVerified {
        caller: Address,
        target: Address,
        verified: bool,
        reply: oneshot::Sender<Result<Source, RegistryError>>,
    },
    /// Administratively set a content record's verification flag.
    SetContentVerified {
        caller: Address,
        content_id: ContentId,
        verified: bool,
        reply: oneshot::Sender<Result<ContentRecord, RegistryError>>,
    },
}
