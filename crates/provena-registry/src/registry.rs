use chrono::Utc;
use tokio::sync::broadcast;

use provena_core::{
    Address, ContentEvent, ContentId, ContentLifecycle, ContentRecord, ContentState,
    ModificationRecord, Source,
};
use provena_crypto::derive_content_id;

use crate::error::RegistryError;
use crate::events::{ContentPublished, RegistryEvent};
use crate::history::ModificationLog;
use crate::ledger::ContentLedger;
use crate::sources::SourceDirectory;

/// Capacity of the registry event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The content authenticity registry.
///
/// An injected store object owning the three tables (sources, content,
/// modification history) and orchestrating every operation. Mutations are
/// expected to be serialized by the caller (the node funnels them through a
/// single event loop); reads may run concurrently with a mutation.
pub struct Registry {
    sources: SourceDirectory,
    ledger: ContentLedger,
    history: ModificationLog,
    events: broadcast::Sender<RegistryEvent>,
    admin: Option<Address>,
}

impl Registry {
    /// Create an empty registry with no administrative identity.
    pub fn new() -> Self {
        Self::with_admin(None)
    }

    /// Create an empty registry.
    ///
    /// `admin` is the identity allowed to run administrative operations
    /// (credibility adjustment, verification flags). With `None`, every
    /// administrative call fails `NotAuthorized`.
    pub fn with_admin(admin: Option<Address>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            sources: SourceDirectory::new(),
            ledger: ContentLedger::new(),
            history: ModificationLog::new(),
            events,
            admin,
        }
    }

    /// Subscribe to registry events.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    // --- Sources ---

    /// Register a new source.
    pub fn register_source(
        &self,
        address: Address,
        public_key: String,
        name: String,
    ) -> Result<Source, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidName("name must not be empty".into()));
        }
        let source = self.sources.register(address, public_key, name)?;
        tracing::info!(address = %source.address, name = %source.name, "source registered");
        Ok(source)
    }

    /// Look up a source by address.
    pub fn get_source(&self, address: &Address) -> Result<Source, RegistryError> {
        self.sources
            .get(address)
            .ok_or_else(|| RegistryError::SourceNotFound(address.clone()))
    }

    // --- Content ---

    /// Publish a content fingerprint.
    ///
    /// The publisher must be registered. The returned id is the sole handle
    /// for later lookups and is also carried by the emitted
    /// `ContentPublished` event.
    pub fn publish_content(
        &self,
        publisher: &Address,
        fingerprint: String,
        content_type: String,
    ) -> Result<ContentId, RegistryError> {
        if !self.sources.contains(publisher) {
            return Err(RegistryError::UnregisteredPublisher(publisher.clone()));
        }

        let sequence = self.ledger.next_sequence();
        let content_id = derive_content_id(publisher, &fingerprint, &content_type, sequence);
        ContentLifecycle::transition(self.content_state(&content_id), ContentEvent::Publish)
            .map_err(|_| {
                RegistryError::Internal(format!("derived content id already present: {}", content_id))
            })?;

        // Snapshot and publication-counter increment happen under the source
        // entry lock; the record below reflects that exact source state.
        let credibility_score = self.sources.record_publication(publisher)?;

        let record = ContentRecord {
            content_id: content_id.clone(),
            fingerprint: fingerprint.clone(),
            publisher: publisher.clone(),
            published_at: Utc::now(),
            content_type,
            credibility_score,
            is_verified: false,
            modifications_count: 0,
        };
        self.ledger.insert(record);

        let _ = self.events.send(RegistryEvent::ContentPublished(ContentPublished {
            content_id: content_id.clone(),
            fingerprint,
            publisher: publisher.clone(),
        }));

        tracing::info!(%content_id, %publisher, "content published");
        Ok(content_id)
    }

    /// Look up a content record.
    pub fn get_content(&self, content_id: &ContentId) -> Result<ContentRecord, RegistryError> {
        self.ledger
            .get(content_id)
            .ok_or_else(|| RegistryError::ContentNotFound(content_id.clone()))
    }

    /// Content ids published by an address, in publication order.
    pub fn list_content_by_publisher(&self, publisher: &Address) -> Vec<ContentId> {
        self.ledger.list_by_publisher(publisher)
    }

    // --- Modification history ---

    /// Append a modification record to a content id's history.
    ///
    /// Only the original publisher or a registered source with
    /// `is_verified = true` may append. The authorization check and the
    /// append run under the history entry lock, so a disallowed caller can
    /// never slip in between check and write. Returns the new index.
    pub fn record_modification(
        &self,
        content_id: &ContentId,
        fingerprint: String,
        description: String,
        modifier: &Address,
    ) -> Result<u64, RegistryError> {
        ContentLifecycle::transition(self.content_state(content_id), ContentEvent::Modify)
            .map_err(|_| RegistryError::ContentNotFound(content_id.clone()))?;
        let record = self.get_content(content_id)?;

        let index = self.history.with_log(content_id, |log| {
            let authorized = *modifier == record.publisher
                || self
                    .sources
                    .get(modifier)
                    .map(|s| s.is_verified)
                    .unwrap_or(false);
            if !authorized {
                return Err(RegistryError::NotAuthorized(
                    "only the publisher or a verified source may record modifications".into(),
                ));
            }
            log.push(ModificationRecord {
                fingerprint,
                description,
                modified_at: Utc::now(),
                modified_by: modifier.clone(),
            });
            Ok((log.len() - 1) as u64)
        })?;

        self.ledger.bump_modifications(content_id).ok_or_else(|| {
            RegistryError::Internal(format!("history without content record: {}", content_id))
        })?;

        tracing::info!(%content_id, %modifier, index, "modification recorded");
        Ok(index)
    }

    /// Get the modification record at `index`.
    ///
    /// Fails `OutOfRange` when the content id is unknown or the index is
    /// past the end of the history.
    pub fn get_modification(
        &self,
        content_id: &ContentId,
        index: u64,
    ) -> Result<ModificationRecord, RegistryError> {
        let count = if self.ledger.contains(content_id) {
            self.history.len(content_id)
        } else {
            0
        };
        self.history
            .get(content_id, index)
            .ok_or(RegistryError::OutOfRange { index, count })
    }

    /// The full ordered modification history for a content id.
    pub fn get_history(
        &self,
        content_id: &ContentId,
    ) -> Result<Vec<ModificationRecord>, RegistryError> {
        if !self.ledger.contains(content_id) {
            return Err(RegistryError::ContentNotFound(content_id.clone()));
        }
        Ok(self.history.list(content_id))
    }

    // --- Administration ---

    /// Adjust a source's credibility score by `delta` (clamped).
    pub fn adjust_credibility(
        &self,
        caller: &Address,
        target: &Address,
        delta: i64,
    ) -> Result<Source, RegistryError> {
        self.require_admin(caller)?;
        let source = self.sources.adjust_credibility(target, delta)?;
        tracing::info!(%target, delta, score = source.credibility_score, "credibility adjusted");
        Ok(source)
    }

    /// Set a source's verification flag.
    pub fn set_source_verified(
        &self,
        caller: &Address,
        target: &Address,
        verified: bool,
    ) -> Result<Source, RegistryError> {
        self.require_admin(caller)?;
        let source = self.sources.set_verified(target, verified)?;
        tracing::info!(%target, verified, "source verification flag set");
        Ok(source)
    }

    /// Set a content record's verification flag.
    pub fn set_content_verified(
        &self,
        caller: &Address,
        content_id: &ContentId,
        verified: bool,
    ) -> Result<ContentRecord, RegistryError> {
        self.require_admin(caller)?;
        let record = self
            .ledger
            .set_verified(content_id, verified)
            .ok_or_else(|| RegistryError::ContentNotFound(content_id.clone()))?;
        tracing::info!(%content_id, verified, "content verification flag set");
        Ok(record)
    }

    fn require_admin(&self, caller: &Address) -> Result<(), RegistryError> {
        match &self.admin {
            Some(admin) if admin == caller => Ok(()),
            _ => Err(RegistryError::NotAuthorized(
                "administrative operations require the configured admin identity".into(),
            )),
        }
    }

    // --- Hydration from persistent storage ---

    /// Restore a source record at startup.
    pub fn load_source(&self, source: Source) {
        self.sources.hydrate(source);
    }

    /// Restore a content record at startup.
    pub fn load_content(&self, record: ContentRecord) {
        self.ledger.hydrate(record);
    }

    /// Restore a content id's modification history at startup.
    pub fn load_history(&self, content_id: ContentId, records: Vec<ModificationRecord>) {
        self.history.hydrate(content_id, records);
    }

    /// Restore a publisher's index in persisted publication order.
    pub fn load_publisher_index(&self, publisher: Address, ids: Vec<ContentId>) {
        self.ledger.hydrate_index(publisher, ids);
    }

    /// Restore the id-derivation sequence counter at startup.
    pub fn restore_sequence(&self, value: u64) {
        self.ledger.restore_sequence(value);
    }

    /// The next id-derivation sequence number (persisted across restarts).
    pub fn current_sequence(&self) -> u64 {
        self.ledger.current_sequence()
    }

    // --- Introspection ---

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.count()
    }

    /// Number of content records.
    pub fn content_count(&self) -> usize {
        self.ledger.count()
    }

    /// All registered sources.
    pub fn all_sources(&self) -> Vec<Source> {
        self.sources.all()
    }

    fn content_state(&self, content_id: &ContentId) -> ContentState {
        if self.ledger.contains(content_id) {
            ContentState::Published
        } else {
            ContentState::Nonexistent
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
