//! Dialog phases of a conversation and the transitions between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a conversation currently is in the top-level sequence.
///
/// `Classification` and `Resolution` only exist while a turn is being
/// processed; between turns a session rests in `Idle`, `Greeting` or
/// `DetailCollection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogPhase {
    /// No message received yet.
    #[default]
    Idle,
    /// Waiting for the user's free-text request.
    Greeting,
    /// The request is with the language understanding service.
    Classification,
    /// Filling visa type, work type and occupation status.
    DetailCollection,
    /// Selecting and rendering the guidance text.
    Resolution,
}

impl DialogPhase {
    /// Returns true if a session may be stored in this phase.
    pub fn is_resting(&self) -> bool {
        matches!(self, Self::Idle | Self::Greeting | Self::DetailCollection)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Greeting => "greeting",
            Self::Classification => "classification",
            Self::DetailCollection => "detail_collection",
            Self::Resolution => "resolution",
        }
    }
}

impl fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for DialogPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogPhase::*;
        matches!(
            (self, target),
            // First message starts the sequence
            (Idle, Greeting) |
            // Classifier configured: the reply goes out for classification
            (Greeting, Classification) |
            // Classifier unconfigured: straight to defaults
            (Greeting, DetailCollection) |
            // Intent with a flow
            (Classification, DetailCollection) |
            // Unknown intent or classifier failure restarts
            (Classification, Greeting) |
            (DetailCollection, Resolution) |
            (Resolution, Greeting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogPhase::*;
        match self {
            Idle => vec![Greeting],
            Greeting => vec![Classification, DetailCollection],
            Classification => vec![DetailCollection, Greeting],
            DetailCollection => vec![Resolution],
            Resolution => vec![Greeting],
        }
    }
}
