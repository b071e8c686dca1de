use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Address, ContentId, BASELINE_CREDIBILITY};

/// A registered publishing source.
///
/// Created once per address; the name and registration time never change
/// afterwards. The credibility score and verification flag are adjusted
/// administratively, and the publication counter only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// The source's account address.
    pub address: Address,
    /// Hex-encoded ed25519 verifying key presented at registration.
    pub public_key: String,
    /// Human-readable name, set once at registration.
    pub name: String,
    /// Current credibility score.
    pub credibility_score: i64,
    /// Number of content records this source has published.
    pub total_publications: u64,
    /// Externally administered verification flag.
    pub is_verified: bool,
    /// When the source registered.
    pub registered_at: DateTime<Utc>,
}

impl Source {
    /// Create a fresh source record with baseline credibility.
    pub fn new(address: Address, public_key: String, name: String) -> Self {
        Self {
            address,
            public_key,
            name,
            credibility_score: BASELINE_CREDIBILITY,
            total_publications: 0,
            is_verified: false,
            registered_at: Utc::now(),
        }
    }
}

/// An immutable ledger entry for one published piece of content.
///
/// `fingerprint`, `publisher`, `published_at`, and `content_type` never
/// change after creation. `credibility_score` is a snapshot of the
/// publisher's score at publication time and does not track later changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique ledger-derived handle.
    pub content_id: ContentId,
    /// Opaque content fingerprint from the storage/hashing collaborator.
    pub fingerprint: String,
    /// Address of the publishing source.
    pub publisher: Address,
    /// When the content was published.
    pub published_at: DateTime<Utc>,
    /// MIME-like content type string.
    pub content_type: String,
    /// Publisher's credibility score at publication time.
    pub credibility_score: i64,
    /// Externally administered verification flag.
    pub is_verified: bool,
    /// Length of the associated modification history.
    pub modifications_count: u64,
}

/// One append-only entry in a content record's modification history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRecord {
    /// Fingerprint of the modified content.
    pub fingerprint: String,
    /// Free-form description of the change.
    pub description: String,
    /// When the modification was recorded.
    pub modified_at: DateTime<Utc>,
    /// Address of the identity that recorded the modification.
    pub modified_by: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_baseline() {
        let addr = Address::new("srcA").unwrap();
        let source = Source::new(addr.clone(), "aa".repeat(32), "Reuters".into());
        assert_eq!(source.address, addr);
        assert_eq!(source.name, "Reuters");
        assert_eq!(source.credibility_score, BASELINE_CREDIBILITY);
        assert_eq!(source.total_publications, 0);
        assert!(!source.is_verified);
    }

    #[test]
    fn test_source_serde_roundtrip() {
        let source = Source::new(Address::new("srcB").unwrap(), "bb".repeat(32), "AP".into());
        let json = serde_json::to_string(&source).unwrap();
        let back: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn test_content_record_serde_roundtrip() {
        let record = ContentRecord {
            content_id: ContentId::from_digest([7u8; 32]),
            fingerprint: "abc123".into(),
            publisher: Address::new("srcA").unwrap(),
            published_at: Utc::now(),
            content_type: "image/jpeg".into(),
            credibility_score: 100,
            is_verified: false,
            modifications_count: 0,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ContentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_modification_record_serde_roundtrip() {
        let record = ModificationRecord {
            fingerprint: "def456".into(),
            description: "cropped image".into(),
            modified_at: Utc::now(),
            modified_by: Address::new("srcA").unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ModificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
