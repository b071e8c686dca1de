//! `provena register` — Register the local identity as a source.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use provena_crypto::{payload, sign};

use super::{bail_with_error_body, print_unreachable};
use crate::keyfile;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Human-readable source name.
    #[arg(short, long)]
    pub name: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Serialize)]
struct RegisterRequest {
    name: String,
    public_key: String,
    signature: String,
}

#[derive(Deserialize)]
struct SourceResponse {
    address: String,
    name: String,
    credibility_score: i64,
    total_publications: u64,
    is_verified: bool,
}

pub async fn run(args: &RegisterArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;
    let message = payload::register_payload(&args.name);
    let signature = sign(&message, &keypair);

    let request = RegisterRequest {
        name: args.name.clone(),
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    };

    let url = format!("{}/api/v1/sources/register", args.endpoint);
    let resp = reqwest::Client::new().post(&url).json(&request).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let source: SourceResponse = r.json().await?;
            println!("Source registered:");
            println!("  Address:      {}", source.address);
            println!("  Name:         {}", source.name);
            println!("  Credibility:  {}", source.credibility_score);
            println!("  Publications: {}", source.total_publications);
            println!("  Verified:     {}", source.is_verified);
        }
        Ok(r) => {
            return Err(bail_with_error_body(r).await);
        }
        Err(e) => {
            print_unreachable(&args.endpoint, &e);
        }
    }

    Ok(())
}
