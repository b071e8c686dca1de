//! Provena Core — Fundamental types, records, and the content lifecycle for
//! the Provena content authenticity registry.

pub mod content_state;
pub mod error;
pub mod records;
pub mod types;

pub use content_state::{ContentEvent, ContentLifecycle, ContentState};
pub use error::CoreError;
pub use records::{ContentRecord, ModificationRecord, Source};
pub use types::{Address, ContentId, BASELINE_CREDIBILITY, MAX_CREDIBILITY, MIN_CREDIBILITY};
