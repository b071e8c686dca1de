//! `provena status` — Query the status of a running Provena node.

use clap::Args;
use serde::Deserialize;

use super::print_unreachable;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8810")]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    version: String,
    source_count: usize,
    content_count: usize,
    uptime_secs: u64,
    storage_errors: u64,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/status", args.endpoint);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let status: StatusResponse = r.json().await?;
            println!("Node Status:");
            println!("  Version:         {}", status.version);
            println!("  Sources:         {}", status.source_count);
            println!("  Content records: {}", status.content_count);
            println!("  Uptime:          {}s", status.uptime_secs);
            println!("  Storage errors:  {}", status.storage_errors);
        }
        Ok(r) => {
            anyhow::bail!("node returned HTTP {}", r.status());
        }
        Err(e) => {
            print_unreachable(&args.endpoint, &e);
        }
    }

    Ok(())
}
