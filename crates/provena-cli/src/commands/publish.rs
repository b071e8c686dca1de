//! `provena publish` — Publish a content fingerprint.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use provena_crypto::{payload, sign};

use super::{bail_with_error_body, print_unreachable};
use crate::keyfile;

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Content fingerprint (content-addressed hash or storage pointer).
    #[arg(short, long)]
    pub fingerprint: String,

    /// MIME-like content type (e.g. image/jpeg).
    #[arg(short = 't', long)]
    pub content_type: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Serialize)]
struct PublishRequest {
    fingerprint: String,
    content_type: String,
    public_key: String,
    signature: String,
}

#[derive(Deserialize)]
struct ContentResponse {
    content_id: String,
    fingerprint: String,
    publisher: String,
    content_type: String,
    credibility_score: i64,
}

pub async fn run(args: &PublishArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;
    let message = payload::publish_payload(&args.fingerprint, &args.content_type);
    let signature = sign(&message, &keypair);

    let request = PublishRequest {
        fingerprint: args.fingerprint.clone(),
        content_type: args.content_type.clone(),
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    };

    let url = format!("{}/api/v1/content/publish", args.endpoint);
    let resp = reqwest::Client::new().post(&url).json(&request).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let content: ContentResponse = r.json().await?;
            println!("Content published:");
            println!("  Content ID:   {}", content.content_id);
            println!("  Fingerprint:  {}", content.fingerprint);
            println!("  Publisher:    {}", content.publisher);
            println!("  Type:         {}", content.content_type);
            println!("  Credibility:  {}", content.credibility_score);
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
