//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and errors
//! that form the vocabulary of the visa guide domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::TransitionError;
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
