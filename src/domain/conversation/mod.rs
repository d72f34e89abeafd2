//! Conversation domain module.
//!
//! The top-level dialog: greeting, classification dispatch, detail
//! collection and resolution, over a session that survives between
//! inbound messages.

mod classification;
mod errors;
pub mod messages;
mod orchestrator;
mod phase;
mod session;

pub use classification::{ClassifierEntities, ClassifierResult};
pub use errors::ConversationError;
pub use orchestrator::{Orchestrator, TurnPlan};
pub use phase::DialogPhase;
pub use session::{Awaiting, DialogSession, PendingDetails};
