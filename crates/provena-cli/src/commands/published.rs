//! `provena published` — List content ids published by an address.

use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;

use super::{bail_with_error_body, print_unreachable};
use crate::keyfile;

#[derive(Args, Debug)]
pub struct PublishedArgs {
    /// Address to list (defaults to the local identity's address).
    pub address: Option<String>,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,

    /// Path to the identity key file.
    #[arg(short, long, default_value = "provena.key")]
    pub key_path: PathBuf,
}

#[derive(Deserialize)]
struct PublishedResponse {
    publisher: String,
    content_ids: Vec<String>,
    count: usize,
}

pub async fn run(args: &PublishedArgs) -> anyhow::Result<()> {
    let address = match &args.address {
        Some(address) => address.clone(),
        None => keyfile::load_keypair(&args.key_path)?.address().to_string(),
    };

    let url = format!("{}/api/v1/sources/{}/content", args.endpoint, address);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let published: PublishedResponse = r.json().await?;
            println!("Content published by {}:", published.publisher);
            if published.content_ids.is_empty() {
                println!("  (none)");
            }
            for content_id in &published.content_ids {
                println!("  {}", content_id);
            }
            println!("  Total: {}", published.count);
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
