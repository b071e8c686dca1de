//! `provena adjust` — Adjust a source's credibility score (admin).

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use provena_crypto::{payload, sign};

use super::{bail_with_error_body, print_unreachable};
use crate::keyfile;

#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Address of the source to adjust.
    #[arg(short, long)]
    pub target: String,

    /// Score delta (may be negative).
    #[arg(short, long, allow_hyphen_values = true)]
    pub delta: i64,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the admin identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Serialize)]
struct AdjustRequest {
    target: String,
    delta: i64,
    public_key: String,
    signature: String,
}

#[derive(Deserialize)]
struct SourceResponse {
    address: String,
    credibility_score: i64,
}

pub async fn run(args: &AdjustArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;
    let message = payload::adjust_payload(&args.target, args.delta);
    let signature = sign(&message, &keypair);

    let request = AdjustRequest {
        target: args.target.clone(),
        delta: args.delta,
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    };

    let url = format!("{}/api/v1/admin/credibility", args.endpoint);
    let resp = reqwest::Client::new().post(&url).json(&request).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let source: SourceResponse = r.json().await?;
            println!("Credibility adjusted:");
            println!("  Address: {}", source.address);
            println!("  Score:   {}", source.credibility_score);
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
