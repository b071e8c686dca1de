use crate::content_state::ContentState;

/// Core type and lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid state transition from {from} on {event}")]
    InvalidStateTransition { from: ContentState, event: String },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid content id: {0}")]
    InvalidContentId(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}
