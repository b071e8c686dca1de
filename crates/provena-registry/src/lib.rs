//! Provena Registry — The content authenticity registry: source directory,
//! append-only content ledger, and per-content modification history.

pub mod error;
pub mod events;
pub mod history;
pub mod ledger;
pub mod registry;
pub mod sources;

pub use error::RegistryError;
pub use events::{ContentPublished, RegistryEvent};
pub use history::ModificationLog;
pub use ledger::ContentLedger;
pub use registry::Registry;
pub use sources::SourceDirectory;
