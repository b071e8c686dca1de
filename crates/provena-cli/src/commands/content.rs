//! `provena content` — Look up a content record by id.

use clap::Args;
use serde::Deserialize;

use super::{bail_with_error_body, print_unreachable};

#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Content id to look up.
    pub content_id: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct ContentResponse {
    content_id: String,
    fingerprint: String,
    publisher: String,
    published_at: chrono::DateTime<chrono::Utc>,
    content_type: String,
    credibility_score: i64,
    is_verified: bool,
    modifications_count: u64,
}

pub async fn run(args: &ContentArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/content/{}", args.endpoint, args.content_id);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let content: ContentResponse = r.json().await?;
            println!("Content Record:");
            println!("  Content ID:    {}", content.content_id);
            println!("  Fingerprint:   {}", content.fingerprint);
            println!("  Publisher:     {}", content.publisher);
            println!("  Published:     {}", content.published_at);
            println!("  Type:          {}", content.content_type);
            println!("  Credibility:   {}", content.credibility_score);
            println!("  Verified:      {}", content.is_verified);
            println!("  Modifications: {}", content.modifications_count);
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
