use provena_core::{Address, ContentId};

/// BLAKE3 hash (32 bytes).
pub type Hash = [u8; 32];

/// Domain tag for content id derivation.
const CONTENT_ID_DOMAIN: &[u8] = b"provena.v1.content-id";

/// Hash arbitrary data using BLAKE3.
pub fn hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Derive a content id from the publication inputs and the ledger's internal
/// sequence number.
///
/// Fields are length-prefixed before hashing so no two distinct input tuples
/// produce the same digest. The sequence number is never exposed to callers,
/// which keeps ids unguessable before publication and distinct across
/// repeated publications of the same fingerprint.
pub fn derive_content_id(
    publisher: &Address,
    fingerprint: &str,
    content_type: &str,
    sequence: u64,
) -> ContentId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(CONTENT_ID_DOMAIN);
    for field in [publisher.as_str(), fingerprint, content_type] {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hasher.update(&sequence.to_le_bytes());
    ContentId::from_digest(*hasher.finalize().as_bytes())
}
