//! Provena CLI — Command-line client for the content authenticity registry.
//!
//! Subcommands: init, start, identity, status, register, source, publish,
//! content, history, modify, published, adjust, verify-source, verify-content.

mod commands;
mod keyfile;

use clap::{Parser, Subcommand};

/// Provena — Content authenticity registry.
#[derive(Parser, Debug)]
#[command(name = "provena", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a local identity keypair.
    Init(commands::init::InitArgs),
    /// Start the Provena registry node.
    Start(commands::start::StartArgs),
    /// Show the local identity (address and public key).
    Identity(commands::identity::IdentityArgs),
    /// Query the status of a running node.
    Status(commands::status::StatusArgs),
    /// Register this identity as a source.
    Register(commands::register::RegisterArgs),
    /// Look up a source by address.
    Source(commands::source::SourceArgs),
    /// Publish a content fingerprint.
    Publish(commands::publish::PublishArgs),
    /// Look up a content record by id.
    Content(commands::content::ContentArgs),
    /// Show a content record's modification history.
    History(commands::history::HistoryArgs),
    /// Record a modification to published content.
    Modify(commands::modify::ModifyArgs),
    /// List content ids published by an address.
    Published(commands::published::PublishedArgs),
    /// Adjust a source's credibility score (admin).
    Adjust(commands::adjust::AdjustArgs),
    /// Set a source's verification flag (admin).
    VerifySource(commands::verify::VerifySourceArgs),
    /// Set a content record's verification flag (admin).
    VerifyContent(commands::verify::VerifyContentArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Start(args) => commands::start::run(args),
        Commands::Identity(args) => commands::identity::run(args),
        Commands::Status(args) => commands::status::run(args).await,
        Commands::Register(args) => commands::register::run(args).await,
        Commands::Source(args) => commands::source::run(args).await,
        Commands::Publish(args) => commands::publish::run(args).await,
        Commands::Content(args) => commands::content::run(args).await,
        Commands::History(args) => commands::history::run(args).await,
        Commands::Modify(args) => commands::modify::run(args).await,
        Commands::Published(args) => commands::published::run(args).await,
        Commands::Adjust(args) => commands::adjust::run(args).await,
        Commands::VerifySource(args) => commands::verify::run_source(args).await,
        Commands::VerifyContent(args) => commands::verify::run_content(args).await,
    }
}
