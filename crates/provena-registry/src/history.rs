use dashmap::DashMap;

use provena_core::{ContentId, ModificationRecord};

/// Append-only modification history, one ordered log per content id.
///
/// Entries are strictly ordered by insertion (index 0..n-1) and never edited
/// or removed once appended.
pub struct ModificationLog {
    logs: DashMap<ContentId, Vec<ModificationRecord>>,
}

impl ModificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            logs: DashMap::new(),
        }
    }

    /// Append a record to a content id's history.
    /// Returns the new record's index (== previous history length).
    pub fn append(&self, content_id: &ContentId, record: ModificationRecord) -> u64 {
        let mut entry = self.logs.entry(content_id.clone()).or_default();
        entry.push(record);
        (entry.len() - 1) as u64
    }

    /// Get the record at `index`, or `None` when out of range.
    pub fn get(&self, content_id: &ContentId, index: u64) -> Option<ModificationRecord> {
        self.logs
            .get(content_id)
            .and_then(|log| log.get(index as usize).cloned())
    }

    /// The full ordered history for a content id (empty if none recorded).
    pub fn list(&self, content_id: &ContentId) -> Vec<ModificationRecord> {
        self.logs
            .get(content_id)
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// History length for a content id.
    pub fn len(&self, content_id: &ContentId) -> u64 {
        self.logs.get(content_id).map(|log| log.len() as u64).unwrap_or(0)
    }

    /// Whether no history exists for any content id.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Restore a content id's history from persistent storage.
    pub fn hydrate(&self, content_id: ContentId, records: Vec<ModificationRecord>) {
        self.logs.insert(content_id, records);
    }

    /// Run a closure with exclusive access to a content id's log.
    ///
    /// The registry uses this to make the authorization check and the append
    /// a single step: no other append to the same history can interleave
    /// between them.
    pub fn with_log<T>(
        &self,
        content_id: &ContentId,
        f: impl FnOnce(&mut Vec<ModificationRecord>) -> T,
    ) -> T {
        let mut entry = self.logs.entry(content_id.clone()).or_default();
        f(&mut entry)
    }
}

impl Default for ModificationLog {
    fn default() -> Self {
        Self::new()
    }
}
