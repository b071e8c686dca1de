//! Provena Crypto — Ed25519 source identities, request signing, and BLAKE3
//! content id derivation for the Provena registry.

pub mod error;
pub mod hashing;
pub mod keys;
pub mod payload;
pub mod signing;

pub use error::CryptoError;
pub use hashing::{derive_content_id, hash, Hash};
pub use keys::{KeyPair, PublicKey};
pub use signing::{sign, verify, Signature};
