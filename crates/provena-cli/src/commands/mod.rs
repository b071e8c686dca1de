pub mod adjust;
pub mod content;
pub mod history;
pub mod identity;
pub mod init;
pub mod modify;
pub mod publish;
pub mod published;
pub mod register;
pub mod source;
pub mod start;
pub mod status;
pub mod verify;

use serde::Deserialize;

/// Error body returned by the node for failed operations.
#[derive(Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

/// Render a failed response with its error kind, or a plain HTTP status when
/// the body is not the node's error shape.
pub async fn bail_with_error_body(resp: reqwest::Response) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) => anyhow::anyhow!("{} ({}, HTTP {})", body.error, body.kind, status),
        Err(_) => anyhow::anyhow!("node returned HTTP {}", status),
    }
}

/// Hint printed when the node cannot be reached.
pub fn print_unreachable(endpoint: &str, error: &reqwest::Error) {
    println!("Could not reach node at {}", endpoint);
    println!("  Error: {}", error);
    println!();
    println!("Is the node running? Start it with: provena-node");
}
