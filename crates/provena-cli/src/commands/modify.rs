//! `provena modify` — Record a modification to published content.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use provena_crypto::{payload, sign};

use super::{bail_with_error_body, print_unreachable};
use crate::keyfile;

#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// Content id to modify.
    pub content_id: String,

    /// Fingerprint of the modified content.
    #[arg(short, long)]
    pub fingerprint: String,

    /// Description of the change.
    #[arg(short, long)]
    pub description: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Serialize)]
struct ModifyRequest {
    fingerprint: String,
    description: String,
    public_key: String,
    signature: String,
}

#[derive(Deserialize)]
struct ModifyResponse {
    content_id: String,
    index: u64,
}

pub async fn run(args: &ModifyArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;
    let message = payload::modify_payload(&args.content_id, &args.fingerprint, &args.description);
    let signature = sign(&message, &keypair);

    let request = ModifyRequest {
        fingerprint: args.fingerprint.clone(),
        description: args.description.clone(),
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    };

    let url = format!(
        "{}/api/v1/content/{}/modifications",
        args.endpoint, args.content_id
    );
    let resp = reqwest::Client::new().post(&url).json(&request).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let result: ModifyResponse = r.json().await?;
            println!("Modification recorded:");
            println!("  Content ID: {}", result.content_id);
            println!("  Index:      {}", result.index);
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
