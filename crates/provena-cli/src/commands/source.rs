//! `provena source` — Look up a source by address.

use clap::Args;
use serde::Deserialize;

use super::{bail_with_error_body, print_unreachable};

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Address of the source.
    pub address: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct SourceResponse {
    address: String,
    name: String,
    credibility_score: i64,
    total_publications: u64,
    is_verified: bool,
    registered_at: chrono::DateTime<chrono::Utc>,
}

pub async fn run(args: &SourceArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/sources/{}", args.endpoint, args.address);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let source: SourceResponse = r.json().await?;
            println!("Source:");
            println!("  Address:      {}", source.address);
            println!("  Name:         {}", source.name);
            println!("  Credibility:  {}", source.credibility_score);
            println!("  Publications: {}", source.total_publications);
            println!("  Verified:     {}", source.is_verified);
            println!("  Registered:   {}", source.registered_at);
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
