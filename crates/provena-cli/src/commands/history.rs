//! `provena history` — Show a content record's modification history.

use clap::Args;
use serde::Deserialize;

use super::{bail_with_error_body, print_unreachable};

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Content id to show the history of.
    pub content_id: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct HistoryResponse {
    content_id: String,
    modifications: Vec<Modification>,
    count: usize,
}

#[derive(Deserialize)]
struct Modification {
    fingerprint: String,
    description: String,
    modified_at: chrono::DateTime<chrono::Utc>,
    modified_by: String,
}

pub async fn run(args: &HistoryArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/content/{}/history", args.endpoint, args.content_id);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let history: HistoryResponse = r.json().await?;
            println!("Modification history for {}:", history.content_id);
            if history.modifications.is_empty() {
                println!("  (no modifications recorded)");
            }
            for (index, modification) in history.modifications.iter().enumerate() {
                println!("  [{}] {}", index, modification.description);
                println!("      Fingerprint: {}", modification.fingerprint);
                println!("      Modified by: {}", modification.modified_by);
                println!("      Modified at: {}", modification.modified_at);
            }
            println!("  Total: {}", history.count);
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
