//! RocksDB storage backend for the Provena node.
//!
//! The in-memory registry is the authoritative finalized state; this layer
//! is the write-through copy it is rebuilt from at startup.

use anyhow::Result;
use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, DB};
use std::collections::HashMap;
use std::path::Path;

use provena_core::{Address, ContentId, ContentRecord, ModificationRecord, Source};

/// Column family names for different data types.
const CF_SOURCES: &str = "sources";
const CF_CONTENT: &str = "content";
const CF_MODIFICATIONS: &str = "modifications";
const CF_BY_PUBLISHER: &str = "by_publisher";
const CF_STATE: &str = "state";

/// Key under `state` holding the id-derivation sequence counter.
const STATE_SEQUENCE: &str = "sequence";

/// RocksDB-backed storage for the Provena node.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open or create a RocksDB database at the given path with column families.
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_SOURCES, Options::default()),
            ColumnFamilyDescriptor::new(CF_CONTENT, Options::default()),
            ColumnFamilyDescriptor::new(CF_MODIFICATIONS, Options::default()),
            ColumnFamilyDescriptor::new(CF_BY_PUBLISHER, Options::default()),
            ColumnFamilyDescriptor::new(CF_STATE, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)?;

        Ok(Self { db })
    }

    fn put(&self, cf_name: &str, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| anyhow::anyhow!("column family '{}' not found", cf_name))?;
        self.db.put_cf(&cf, key, value)?;
        Ok(())
    }

    fn get(&self, cf_name: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| anyhow::anyhow!("column family '{}' not found", cf_name))?;
        Ok(self.db.get_cf(&cf, key)?)
    }

    fn iter_all(&self, cf_name: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| anyhow::anyhow!("column family '{}' not found", cf_name))?;
        let mut pairs = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item?;
            pairs.push((key.to_vec(), value.to_vec()));
        }
        Ok(pairs)
    }

    // --- Sources ---

    /// Store a source record.
    pub fn put_source(&self, source: &Source) -> Result<()> {
        let value = serde_json::to_vec(source)?;
        self.put(CF_SOURCES, source.address.as_str().as_bytes(), &value)
    }

    /// Load all source records.
    pub fn load_sources(&self) -> Result<Vec<Source>> {
        self.iter_all(CF_SOURCES)?
            .into_iter()
            .map(|(_, value)| Ok(serde_json::from_slice(&value)?))
            .collect()
    }

    // --- Content records ---

    /// Store a content record.
    pub fn put_content(&self, record: &ContentRecord) -> Result<()> {
        let value = serde_json::to_vec(record)?;
        self.put(CF_CONTENT, record.content_id.as_str().as_bytes(), &value)
    }

    /// Load all content records.
    pub fn load_content(&self) -> Result<Vec<ContentRecord>> {
        self.iter_all(CF_CONTENT)?
            .into_iter()
            .map(|(_, value)| Ok(serde_json::from_slice(&value)?))
            .collect()
    }

    // --- Modification history ---

    /// Store one modification record at its index in a content id's history.
    pub fn put_modification(
        &self,
        content_id: &ContentId,
        index: u64,
        record: &ModificationRecord,
    ) -> Result<()> {
        // Zero-padded index keeps keys ordered within a content id's prefix.
        let key = format!("{}/{:010}", content_id, index);
        let value = serde_json::to_vec(record)?;
        self.put(CF_MODIFICATIONS, key.as_bytes(), &value)
    }

    /// Load every content id's modification history, in append order.
    pub fn load_modifications(&self) -> Result<HashMap<ContentId, Vec<ModificationRecord>>> {
        let mut histories: HashMap<ContentId, Vec<ModificationRecord>> = HashMap::new();
        for (key, value) in self.iter_all(CF_MODIFICATIONS)? {
            let key = String::from_utf8(key)?;
            let (id_hex, _) = key
                .split_once('/')
                .ok_or_else(|| anyhow::anyhow!("malformed modification key: {}", key))?;
            let content_id = ContentId::new(id_hex)
                .map_err(|e| anyhow::anyhow!("bad content id in key {}: {}", key, e))?;
            let record: ModificationRecord = serde_json::from_slice(&value)?;
            histories.entry(content_id).or_default().push(record);
        }
        Ok(histories)
    }

    // --- Publisher index ---

    /// Store the ordered list of content ids for one publisher.
    pub fn put_publisher_index(&self, publisher: &Address, ids: &[ContentId]) -> Result<()> {
        let value = serde_json::to_vec(ids)?;
        self.put(CF_BY_PUBLISHER, publisher.as_str().as_bytes(), &value)
    }

    /// Load the publisher index.
    pub fn load_publisher_index(&self) -> Result<HashMap<Address, Vec<ContentId>>> {
        let mut index = HashMap::new();
        for (key, value) in self.iter_all(CF_BY_PUBLISHER)? {
            let address = Address(String::from_utf8(key)?);
            let ids: Vec<ContentId> = serde_json::from_slice(&value)?;
            index.insert(address, ids);
        }
        Ok(index)
    }

    // --- Node state ---

    /// Persist the id-derivation sequence counter.
    pub fn put_sequence(&self, sequence: u64) -> Result<()> {
        self.put(CF_STATE, STATE_SEQUENCE.as_bytes(), &sequence.to_le_bytes())
    }

    /// Load the id-derivation sequence counter, if any was persisted.
    pub fn load_sequence(&self) -> Result<Option<u64>> {
        match self.get(CF_STATE, STATE_SEQUENCE.as_bytes())? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("malformed sequence value"))?;
                Ok(Some(u64::from_le_bytes(arr)))
            }
            None => Ok(None),
        }
    }
}
