use provena_core::{Address, ContentId};

/// Registry operation errors.
///
/// Every mutating operation fails with a distinct kind so callers can tell
/// "already registered" from "not permitted" from "connection lost".
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("source already registered: {0}")]
    AlreadyRegistered(Address),

    #[error("publisher not registered: {0}")]
    UnregisteredPublisher(Address),

    #[error("source not found: {0}")]
    SourceNotFound(Address),

    #[error("content not found: {0}")]
    ContentNotFound(ContentId),

    #[error("not authorized: {0}")]
    NotAuthorized(String),

    #[error("modification index {index} out of range (history length {count})")]
    OutOfRange { index: u64, count: u64 },

    #[error("invalid source name: {0}")]
    InvalidName(String),

    #[error("substrate unavailable: {0}")]
    Substrate(String),

    #[error("internal registry invariant violated: {0}")]
    Internal(String),
}
