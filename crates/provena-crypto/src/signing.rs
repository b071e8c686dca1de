use ed25519_dalek::Signer;
use ed25519_dalek::Verifier;

use crate::error::CryptoError;
use crate::keys::{KeyPair, PublicKey};

/// Ed25519 signature (64 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    inner: ed25519_dalek::Signature,
}

impl Signature {
    /// Get the raw bytes (64 bytes).
    pub fn to_bytes(&self) -> [u8; 64] {
        self.inner.to_bytes()
    }

    /// Create from raw bytes (64 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: 64,
            actual: bytes.len(),
        })?;
        Ok(Self {
            inner: ed25519_dalek::Signature::from_bytes(&arr),
        })
    }

    /// Encode as hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes =
            hex::decode(s).map_err(|e| CryptoError::InvalidInput(format!("not hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

/// Sign a message using Ed25519.
pub fn sign(message: &[u8], keypair: &KeyPair) -> Signature {
    let sig = keypair.signing_key().sign(message);
    Signature { inner: sig }
}

/// Verify an Ed25519 signature.
pub fn verify(
    message: &[u8],
    signature: &Signature,
    pubkey: &PublicKey,
) -> Result<(), CryptoError> {
    pubkey
        .verifying_key()
        .verify(message, &signature.inner)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let kp = KeyPair::generate();
        let message = b"provena registry request";
        let sig = sign(message, &kp);
        assert!(verify(message, &sig, &kp.public_key()).is_ok());
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let kp = KeyPair::generate();
        let sig = sign(b"correct message", &kp);
        assert!(verify(b"wrong message", &sig, &kp.public_key()).is_err());
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let sig = sign(b"test message", &kp1);
        assert!(verify(b"test message", &sig, &kp2.public_key()).is_err());
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let kp = KeyPair::generate();
        let sig = sign(b"test", &kp);
        let hex_str = sig.to_hex();
        assert_eq!(hex_str.len(), 128);
        let back = Signature::from_hex(&hex_str).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_signature_from_invalid_bytes() {
        assert!(Signature::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_deterministic_signatures() {
        let kp = KeyPair::from_seed(&[99u8; 32]);
        let sig1 = sign(b"deterministic test", &kp);
        let sig2 = sign(b"deterministic test", &kp);
        assert_eq!(sig1, sig2);
    }
}
