//! `provena identity` — Show the local identity (address and public key).

use clap::Args;
use std::path::PathBuf;

use crate::keyfile;

#[derive(Args, Debug)]
pub struct IdentityArgs {
    /// Path to the identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

pub fn run(args: &IdentityArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;

    println!("Local Identity:");
    println!("  Address:     {}", keypair.address());
    println!("  Public key:  {}", keypair.public_key().to_hex());
    Ok(())
}
