use std::fmt;

use crate::error::CoreError;

/// The states of a content record's lifecycle.
///
/// There is no deleted or retracted state: a record, once published, exists
/// forever, and every later change is an appended modification event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ContentState {
    /// No record exists for this id.
    Nonexistent,
    /// The record exists in the ledger.
    Published,
}

impl fmt::Display for ContentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonexistent => write!(f, "Nonexistent"),
            Self::Published => write!(f, "Published"),
        }
    }
}

/// Events that drive content state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEvent {
    /// A source publishes the content.
    Publish,
    /// A modification is appended to the history.
    Modify,
}

/// Content lifecycle transitions.
///
/// Valid transitions:
/// - Nonexistent → Published (Publish)
/// - Published → Published (Modify; increments history length, not a new state)
pub struct ContentLifecycle;

impl ContentLifecycle {
    /// Attempt a state transition based on an event.
    pub fn transition(current: ContentState, event: ContentEvent) -> Result<ContentState, CoreError> {
        let new_state = match (current, event) {
            (ContentState::Nonexistent, ContentEvent::Publish) => ContentState::Published,
            (ContentState::Published, ContentEvent::Modify) => ContentState::Published,
            _ => {
                return Err(CoreError::InvalidStateTransition {
                    from: current,
                    event: format!("{:?}", event),
                });
            }
        };

        tracing::debug!(from = %current, to = %new_state, event = ?event, "content state transition");

        Ok(new_state)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(current: ContentState, event: ContentEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
