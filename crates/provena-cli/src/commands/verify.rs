//! `provena verify-source` / `provena verify-content` — Set verification
//! flags (admin).

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use provena_crypto::{payload, sign};

use super::{bail_with_error_body, print_unreachable};
use crate::keyfile;

#[derive(Args, Debug)]
pub struct VerifySourceArgs {
    /// Address of the source.
    #[arg(short, long)]
    pub target: String,

    /// Flag value to set.
    #[arg(long, default_value_t = true)]
    pub verified: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the admin identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct VerifyContentArgs {
    /// Content id.
    #[arg(short, long)]
    pub content_id: String,

    /// Flag value to set.
    #[arg(long, default_value_t = true)]
    pub verified: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the admin identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Serialize)]
struct VerifySourceRequest {
    target: String,
    verified: bool,
    public_key: String,
    signature: String,
}

#[derive(Serialize)]
struct VerifyContentRequest {
    content_id: String,
    verified: bool,
    public_key: String,
    signature: String,
}

#[derive(Deserialize)]
struct SourceResponse {
    address: String,
    is_verified: bool,
}

#[derive(Deserialize)]
struct ContentResponse {
    content_id: String,
    is_verified: bool,
}

pub async fn run_source(args: &VerifySourceArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;
    let message = payload::verify_source_payload(&args.target, args.verified);
    let signature = sign(&message, &keypair);

    let request = VerifySourceRequest {
        target: args.target.clone(),
        verified: args.verified,
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    };

    let url = format!("{}/api/v1/admin/verify-source", args.endpoint);
    let resp = reqwest::Client::new().post(&url).json(&request).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let source: SourceResponse = r.json().await?;
            println!("Source verification flag set:");
            println!("  Address:  {}", source.address);
            println!("  Verified: {}", source.is_verified);
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

pub async fn run_content(args: &VerifyContentArgs) -> anyhow::Result<()> {
    let keypair = keyfile::load_keypair(&args.key_path)?;
    let message = payload::verify_content_payload(&args.content_id, args.verified);
    let signature = sign(&message, &keypair);

    let request = VerifyContentRequest {
        content_id: args.content_id.clone(),
        verified: args.verified,
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    };

    let url = format!("{}/api/v1/admin/verify-content", args.endpoint);
    let resp = reqwest::Client::new().post(&url).json(&request).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let content: ContentResponse = r.json().await?;
            println!("Content verification flag set:");
            println!("  Content ID: {}", content.content_id);
            println!("  Verified:   {}", content.is_verified);
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
