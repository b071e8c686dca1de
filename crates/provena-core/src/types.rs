use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Credibility score assigned to a source at registration.
pub const BASELINE_CREDIBILITY: i64 = 100;

/// Lower bound for a source's credibility score.
pub const MIN_CREDIBILITY: i64 = 0;

/// Upper bound for a source's credibility score.
pub const MAX_CREDIBILITY: i64 = 1000;

/// Account address of a publishing source.
///
/// Derived from the source's ed25519 verifying key as
/// `bs58(blake3(pubkey)[..20])`; the registry treats it as an opaque,
/// unique identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    /// Create an address from its string form.
    pub fn new(addr: impl Into<String>) -> Result<Self, CoreError> {
        let addr = addr.into();
        if addr.is_empty() {
            return Err(CoreError::InvalidAddress("address is empty".into()));
        }
        if addr.chars().any(|c| c.is_whitespace()) {
            return Err(CoreError::InvalidAddress(format!(
                "address contains whitespace: {}",
                addr
            )));
        }
        Ok(Self(addr))
    }

    /// Get the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique handle for a content record.
///
/// A 32-byte BLAKE3 digest in lowercase hex, derived by the ledger from the
/// publisher, fingerprint, content type, and an internal sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    /// Parse a content id from its hex string form.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        let bytes = hex::decode(&id)
            .map_err(|_| CoreError::InvalidContentId(format!("not hex: {}", id)))?;
        if bytes.len() != 32 {
            return Err(CoreError::InvalidContentId(format!(
                "content id must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        if id.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(CoreError::InvalidContentId(format!(
                "content id must be lowercase hex: {}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Build a content id from a raw 32-byte digest.
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// Get the hex string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
