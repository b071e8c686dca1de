//! On-disk keypair management for the CLI.
//!
//! The secret key is stored as a hex string in a plain file; the address is
//! re-derived from it on every load.

use std::path::Path;

use anyhow::{Context, Result};
use provena_crypto::KeyPair;

/// Load a keypair from a hex-encoded key file.
pub fn load_keypair(path: &Path) -> Result<KeyPair> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("no identity key at {} (run `provena init` first)", path.display()))?;
    let bytes = hex::decode(contents.trim()).context("identity key file is not valid hex")?;
    KeyPair::from_bytes(&bytes).map_err(|e| anyhow::anyhow!("invalid identity key: {}", e))
}

/// Save a keypair as a hex-encoded key file.
pub fn save_keypair(path: &Path, keypair: &KeyPair) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, hex::encode(keypair.to_bytes()))?;
    Ok(())
}
