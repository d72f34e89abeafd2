//! Error types for the conversation domain.

use crate::domain::foundation::TransitionError;

use super::phase::DialogPhase;

/// Errors raised while driving a dialog session.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("A turn is already being processed (phase {0})")]
    TurnInProgress(DialogPhase),

    #[error("No classification is pending (phase {0})")]
    NotClassifying(DialogPhase),

    #[error("Detail collection has no pending step")]
    NothingPending,

    #[error("Detail collection finished without {0}")]
    IncompleteDetails(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_errors_convert() {
        let err: ConversationError = TransitionError::new("Idle", "Resolution").into();
        assert_eq!(err.to_string(), "Cannot transition from Idle to Resolution");
    }

    #[test]
    fn phase_errors_name_the_phase() {
        let err = ConversationError::TurnInProgress(DialogPhase::Classification);
        assert!(err.to_string().contains("classification"));
    }
}
