//! `provena init` — Generate a local identity keypair.

use clap::Args;
use std::path::PathBuf;

use provena_crypto::KeyPair;

use crate::keyfile;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to write the identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,

    /// Overwrite an existing key file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    if args.key_path.exists() && !args.force {
        anyhow::bail!(
            "key file {} already exists (use --force to overwrite)",
            args.key_path.display()
        );
    }

    let keypair = KeyPair::generate();
    keyfile::save_keypair(&args.key_path, &keypair)?;

    println!("Identity created:");
    println!("  Address:     {}", keypair.address());
    println!("  Public key:  {}", keypair.public_key().to_hex());
    println!("  Key file:    {}", args.key_path.display());
    Ok(())
}
