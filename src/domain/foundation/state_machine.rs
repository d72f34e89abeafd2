//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state transitions
//! across the dialog phases and the detail-collection steps.

use super::TransitionError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DetailStep {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (VisaType, WorkType) | (WorkType, OccupationStatus))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             VisaType => vec![WorkType],
///             WorkType => vec![OccupationStatus],
///             OccupationStatus => vec![],
///         }
///     }
/// }
///
/// let next = DetailStep::VisaType.transition_to(DetailStep::WorkType)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError::new(
                format!("{:?}", self),
                format!("{:?}", target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
