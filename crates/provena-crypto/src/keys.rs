use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use provena_core::Address;

use crate::error::CryptoError;

/// Number of digest bytes used for address derivation.
const ADDRESS_LEN: usize = 20;

/// An ed25519 keypair identifying a publishing source.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret half.
        f.debug_struct("KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate a fresh random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministically derive a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Restore a keypair from its 32-byte secret key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self::from_seed(&arr))
    }

    /// Get the 32-byte secret key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Get the public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    /// The account address of this keypair's identity.
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

/// An ed25519 verifying key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl PublicKey {
    /// Restore a public key from its 32-byte form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        let verifying_key = VerifyingKey::from_bytes(&arr)
            .map_err(|e| CryptoError::InvalidInput(format!("invalid public key: {}", e)))?;
        Ok(Self { verifying_key })
    }

    /// Parse a public key from its hex string form.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes =
            hex::decode(s).map_err(|e| CryptoError::InvalidInput(format!("not hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Get the 32-byte form.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Encode as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the account address: `bs58(blake3(pubkey)[..20])`.
    pub fn address(&self) -> Address {
        let digest = blake3::hash(&self.to_bytes());
        Address(bs58::encode(&digest.as_bytes()[..ADDRESS_LEN]).into_string())
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_distinct() {
        let a = KeyPair::generate();
        let b = KeyPair::generate();
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn test_from_seed_deterministic() {
        let a = KeyPair::from_seed(&[42u8; 32]);
        let b = KeyPair::from_seed(&[42u8; 32]);
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_keypair_bytes_roundtrip() {
        let kp = KeyPair::generate();
        let restored = KeyPair::from_bytes(&kp.to_bytes()).unwrap();
        assert_eq!(restored.to_bytes(), kp.to_bytes());
    }

    #[test]
    fn test_keypair_from_invalid_bytes() {
        assert!(KeyPair::from_bytes(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let kp = KeyPair::generate();
        let pk = kp.public_key();
        let restored = PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(restored, pk);
    }

    #[test]
    fn test_public_key_from_invalid_hex() {
        assert!(PublicKey::from_hex("not-hex").is_err());
        assert!(PublicKey::from_hex("abcd").is_err());
    }

    #[test]
    fn test_address_deterministic() {
        let kp = KeyPair::from_seed(&[7u8; 32]);
        assert_eq!(kp.address(), kp.public_key().address());
    }

    #[test]
    fn test_address_distinct_per_key() {
        let a = KeyPair::from_seed(&[1u8; 32]);
        let b = KeyPair::from_seed(&[2u8; 32]);
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_address_is_valid_core_address() {
        let kp = KeyPair::generate();
        let addr = kp.address();
        assert!(provena_core::Address::new(addr.as_str()).is_ok());
    }
}
