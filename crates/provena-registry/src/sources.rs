use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use provena_core::{Address, Source, MAX_CREDIBILITY, MIN_CREDIBILITY};

use crate::error::RegistryError;

/// In-memory directory of registered sources, keyed by address.
///
/// Registration is a one-time action: the entry API rejects a duplicate
/// address atomically, so two racing registrations can never both succeed.
pub struct SourceDirectory {
    sources: DashMap<Address, Source>,
}

impl SourceDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            sources: DashMap::new(),
        }
    }

    /// Register a new source with baseline credibility.
    ///
    /// Fails with `AlreadyRegistered` when the address already has a record;
    /// the existing record is never overwritten.
    pub fn register(
        &self,
        address: Address,
        public_key: String,
        name: String,
    ) -> Result<Source, RegistryError> {
        match self.sources.entry(address.clone()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered(address)),
            Entry::Vacant(vacant) => {
                let source = Source::new(address, public_key, name);
                vacant.insert(source.clone());
                Ok(source)
            }
        }
    }

    /// Look up a source by address.
    pub fn get(&self, address: &Address) -> Option<Source> {
        self.sources.get(address).map(|e| e.clone())
    }

    /// Whether an address has a registered source.
    pub fn contains(&self, address: &Address) -> bool {
        self.sources.contains_key(address)
    }

    /// Increment the source's publication counter and return the credibility
    /// score to snapshot into the new content record.
    ///
    /// The increment and the snapshot happen under the entry lock, so a
    /// concurrent reader never observes a content record whose snapshot does
    /// not correspond to a valid prior state of the source.
    pub fn record_publication(&self, address: &Address) -> Result<i64, RegistryError> {
        let mut entry = self
            .sources
            .get_mut(address)
            .ok_or_else(|| RegistryError::UnregisteredPublisher(address.clone()))?;
        entry.total_publications += 1;
        Ok(entry.credibility_score)
    }

    /// Apply an administrative credibility adjustment, clamped into
    /// `[MIN_CREDIBILITY, MAX_CREDIBILITY]`.
    pub fn adjust_credibility(
        &self,
        address: &Address,
        delta: i64,
    ) -> Result<Source, RegistryError> {
        let mut entry = self
            .sources
            .get_mut(address)
            .ok_or_else(|| RegistryError::SourceNotFound(address.clone()))?;
        entry.credibility_score = entry
            .credibility_score
            .saturating_add(delta)
            .clamp(MIN_CREDIBILITY, MAX_CREDIBILITY);
        Ok(entry.clone())
    }

    /// Set the externally administered verification flag.
    pub fn set_verified(&self, address: &Address, verified: bool) -> Result<Source, RegistryError> {
        let mut entry = self
            .sources
            .get_mut(address)
            .ok_or_else(|| RegistryError::SourceNotFound(address.clone()))?;
        entry.is_verified = verified;
        Ok(entry.clone())
    }

    /// Insert a source restored from persistent storage.
    pub fn hydrate(&self, source: Source) {
        self.sources.insert(source.address.clone(), source);
    }

    /// All registered sources.
    pub fn all(&self) -> Vec<Source> {
        self.sources.iter().map(|e| e.value().clone()).collect()
    }

    /// Number of registered sources.
    pub fn count(&self) -> usize {
        self.sources.len()
    }
}

impl Default for SourceDirectory {
    fn default() -> Self {
        Self::new()
    }
}
