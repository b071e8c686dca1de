use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use provena_core::{Address, ContentId, ContentRecord};

/// In-memory content ledger keyed by content id, with a publisher index.
///
/// Records are append-only: once inserted, the provenance fields never
/// change. The sequence counter feeds content id derivation and only ever
/// grows, so repeated publications of the same fingerprint get distinct ids.
pub struct ContentLedger {
    records: DashMap<ContentId, ContentRecord>,
    by_publisher: DashMap<Address, Vec<ContentId>>,
    sequence: AtomicU64,
}

impl ContentLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            by_publisher: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Claim the next id-derivation sequence number.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    /// The next sequence number that would be claimed (for persistence).
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Restore the sequence counter from persistent storage.
    pub fn restore_sequence(&self, value: u64) {
        self.sequence.store(value, Ordering::SeqCst);
    }

    /// Insert a new content record and index it under its publisher.
    pub fn insert(&self, record: ContentRecord) {
        self.by_publisher
            .entry(record.publisher.clone())
            .or_default()
            .push(record.content_id.clone());
        self.records.insert(record.content_id.clone(), record);
    }

    /// Look up a content record.
    pub fn get(&self, content_id: &ContentId) -> Option<ContentRecord> {
        self.records.get(content_id).map(|e| e.clone())
    }

    /// Whether a record exists for this id.
    pub fn contains(&self, content_id: &ContentId) -> bool {
        self.records.contains_key(content_id)
    }

    /// Content ids published by an address, in publication order.
    pub fn list_by_publisher(&self, publisher: &Address) -> Vec<ContentId> {
        self.by_publisher
            .get(publisher)
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Mirror a history append onto the record's derived counter.
    /// Returns the updated record.
    pub fn bump_modifications(&self, content_id: &ContentId) -> Option<ContentRecord> {
        let mut entry = self.records.get_mut(content_id)?;
        entry.modifications_count += 1;
        Some(entry.clone())
    }

    /// Set the externally administered verification flag.
    /// Returns the updated record, or `None` for an unknown id.
    pub fn set_verified(&self, content_id: &ContentId, verified: bool) -> Option<ContentRecord> {
        let mut entry = self.records.get_mut(content_id)?;
        entry.is_verified = verified;
        Some(entry.clone())
    }

    /// Insert a record restored from persistent storage.
    pub fn hydrate(&self, record: ContentRecord) {
        self.insert(record);
    }

    /// Replace a publisher's index with the persisted publication order.
    ///
    /// Reload iterates content records in id order, so the index built by
    /// `hydrate` must be overwritten with the stored one afterwards.
    pub fn hydrate_index(&self, publisher: Address, ids: Vec<ContentId>) {
        self.by_publisher.insert(publisher, ids);
    }

    /// Number of content records.
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

impl Default for ContentLedger {
    fn default() -> Self {
        Self::new()
    }
}
